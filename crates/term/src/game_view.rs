//! GameView: maps a core [`Snapshot`] into a terminal framebuffer.
//!
//! The field is drawn with its console glyphs: `#` walls, `A`..`G` locked
//! pieces, `=` rows being cleared. A side panel to the right shows the
//! counters and the next piece.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb, CONSOLE_PALETTE, DEFAULT_TEXT_COLOR};
use crate::types::{Cell, PieceKind, Rotation};

/// Columns reserved right of the field for the side panel.
const PANEL_W: u16 = 12;
/// Gap between the field and the side panel.
const PANEL_GAP: u16 = 2;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal view of one game session.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
    /// Foreground for everything drawn
    text: Rgb,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 1,
            anchor_y: AnchorY::Center,
            text: CONSOLE_PALETTE[DEFAULT_TEXT_COLOR as usize],
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_text_color(mut self, text: Rgb) -> Self {
        self.text = text;
        self
    }

    pub fn text_color(&self) -> Rgb {
        self.text
    }

    /// Top-left terminal cell of the field for this snapshot and viewport.
    pub fn field_origin(&self, snap: &Snapshot<'_>, viewport: Viewport) -> (u16, u16) {
        let field_px_w = snap.width.saturating_mul(self.cell_w);
        let total_w = field_px_w + PANEL_GAP + PANEL_W;
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(snap.height) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse one framebuffer across frames.
    pub fn render_into(&self, snap: &Snapshot<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (start_x, start_y) = self.field_origin(snap, viewport);

        for y in 0..snap.height {
            for x in 0..snap.width {
                let cell = snap.cell(x, y).unwrap_or_default();
                self.draw_field_cell(fb, start_x, start_y, x, y, cell.glyph(), cell == Cell::Clearing);
            }
        }

        if let Some(active) = snap.active {
            let letter = active.kind().letter();
            for (x, y) in active.cells() {
                if x >= 0 && y >= 0 && x < snap.width as i32 && y < snap.height as i32 {
                    self.draw_field_cell(fb, start_x, start_y, x as u16, y as u16, letter, true);
                }
            }
        }

        let field_px_w = snap.width.saturating_mul(self.cell_w);
        self.draw_side_panel(fb, snap, start_x + field_px_w + PANEL_GAP, start_y);

        if snap.game_over() {
            self.draw_overlay_text(fb, start_x, start_y, field_px_w, snap.height, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn style(&self, bold: bool) -> CellStyle {
        CellStyle {
            bold,
            ..CellStyle::with_fg(self.text)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_field_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        ch: char,
        bold: bool,
    ) {
        let px = start_x + x * self.cell_w;
        fb.fill_rect(px, start_y + y, self.cell_w, 1, ch, self.style(bold));
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot<'_>, panel_x: u16, start_y: u16) {
        if panel_x >= fb.width() {
            return;
        }
        let label = self.style(true);
        let value = self.style(false);

        let mut y = start_y;
        for (name, v) in [("SCORE", snap.score), ("LINES", snap.lines), ("SPEED", snap.speed)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT PIECE", label);
        y += 1;
        draw_preview(fb, panel_x, y, snap.next_kind, value);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// The 4x4 base pattern of `kind`, occupied cells drawn with its letter.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, style: CellStyle) {
    for (lx, ly) in shape(kind).cells(Rotation::North) {
        fb.put_char(x + lx as u16, y + ly as u16, kind.letter(), style);
    }
}
