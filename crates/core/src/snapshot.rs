//! Snapshot module - what a frontend sees after each tick
//!
//! A [`Snapshot`] borrows the engine's field, so it is cheap to build every
//! frame and cannot outlive the state it describes.

use crate::engine::Phase;
use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind};

/// Borrowed, read-only view of the engine after a tick
///
/// Renderers and tests read everything they need from here; it lives only as
/// long as the borrow of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    /// Row-major field cells (`y * width + x`)
    pub cells: &'a [Cell],
    pub width: u16,
    pub height: u16,
    /// `None` only while rows are clearing
    pub active: Option<ActivePiece>,
    pub next_kind: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub speed: u32,
    pub piece_count: u32,
    pub phase: Phase,
}

impl<'a> Snapshot<'a> {
    /// Cell at `(x, y)`, `None` when out of bounds.
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pending_clears(&self) -> bool {
        self.phase == Phase::Clearing
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Field coordinates of the active piece, empty when there is none.
    pub fn active_cells(&self) -> impl Iterator<Item = (i32, i32)> {
        self.active
            .into_iter()
            .flat_map(|piece| piece.cells().collect::<Vec<_>>())
    }

    /// Field rows as strings of glyphs, active piece drawn in.
    pub fn rows(&self) -> Vec<String> {
        let w = self.width as usize;
        let mut grid: Vec<char> = self.cells.iter().map(|c| c.glyph()).collect();
        if let Some(piece) = self.active {
            for (x, y) in piece.cells() {
                if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < self.height as usize {
                    grid[y as usize * w + x as usize] = piece.kind().letter();
                }
            }
        }
        grid.chunks(w).map(|row| row.iter().collect()).collect()
    }
}
