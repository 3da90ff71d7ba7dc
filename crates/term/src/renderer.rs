//! TerminalRenderer: puts the game screen on a real terminal.
//!
//! Cells painted with one of the 16 console colors go out as the terminal's
//! own ANSI colors, so the player's text color follows the terminal theme.
//! Anything else is sent as 24-bit RGB.
//!
//! The first frame after [`TerminalRenderer::enter`], a resize or
//! [`TerminalRenderer::invalidate`] is written whole; later frames only
//! rewrite the spans of cells that changed.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb, CONSOLE_PALETTE};

/// Owns stdout while a session runs in the alternate screen.
///
/// Call [`TerminalRenderer::exit`] on every path out of a session, including
/// errors, so raw mode never outlives the game.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal shows right now
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.shown = None;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Write the next frame in full, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `frame`, writing only what differs from the previous one.
    ///
    /// The previous frame is handed back through `frame`, so one pair of
    /// buffers serves the whole session.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(shown) => {
                write_changes(&shown, frame, &mut self.buf)?;
                shown
            }
            None => {
                write_frame(frame, &mut self.buf)?;
                FrameBuffer::new(frame.width(), frame.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut shown, frame);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Clear the screen and write every cell of `frame` into `out`.
pub fn write_frame(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for (y, row) in rows(frame).enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        pen.print(out, row)?;
    }
    pen.finish(out)
}

/// Write the cells of `frame` that differ from `shown` into `out`.
///
/// Falls back to [`write_frame`] when the sizes differ. Identical frames
/// write nothing.
pub fn write_changes(shown: &FrameBuffer, frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if shown.width() != frame.width() || shown.height() != frame.height() {
        return write_frame(frame, out);
    }
    let mut pen = Pen::default();
    for (y, (before, after)) in rows(shown).zip(rows(frame)).enumerate() {
        for span in changed_spans(before, after) {
            out.queue(cursor::MoveTo(span.start as u16, y as u16))?;
            pen.print(out, &after[span])?;
        }
    }
    pen.finish(out)
}

/// Terminal color for a framebuffer color.
///
/// Console palette entries map onto the ANSI 16 colors. The console orders
/// its bits blue-green-red while ANSI orders them red-green-blue, so the red
/// and blue bits swap.
pub fn term_color(rgb: Rgb) -> Color {
    match CONSOLE_PALETTE.iter().position(|&c| c == rgb) {
        Some(index) => {
            let index = index as u8;
            Color::AnsiValue((index & 0b1010) | ((index & 1) << 2) | ((index >> 2) & 1))
        }
        None => Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        },
    }
}

fn rows(frame: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    let width = frame.width().max(1) as usize;
    frame.cells().chunks(width)
}

/// Maximal runs of positions where `before` and `after` disagree.
fn changed_spans<'a>(before: &'a [Cell], after: &'a [Cell]) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < after.len() && before.get(x) == Some(&after[x]) {
            x += 1;
        }
        if x >= after.len() {
            return None;
        }
        let start = x;
        while x < after.len() && before.get(x) != Some(&after[x]) {
            x += 1;
        }
        Some(start..x)
    })
}

/// Tracks the terminal's current style so only changes are sent.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            self.switch_to(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn switch_to(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        if prev == Some(style) {
            return Ok(());
        }
        if prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(term_color(style.fg)))?;
        }
        if prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(term_color(style.bg)))?;
        }
        if prev.map(|p| (p.bold, p.dim)) != Some((style.bold, style.dim)) {
            out.queue(SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        Ok(())
    }

    /// Leave the terminal in its default style if anything was printed.
    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}
