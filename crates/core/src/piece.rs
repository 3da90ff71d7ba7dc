//! Active piece - the falling tetromino and its placement
//!
//! `ActivePiece` is plain placement data with no validation of its own. Its
//! movement helpers return *candidate* placements; the engine asks the field
//! for a [`Fitted`](crate::field::Fitted) token before adopting one.

use crate::shape::shape;
use crate::types::{PieceKind, Rotation};

/// Kind plus placement of the piece being controlled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    /// Left column of the 4x4 box in field coordinates
    x: i32,
    /// Top row of the 4x4 box in field coordinates
    y: i32,
    rotation: Rotation,
}

impl ActivePiece {
    /// A piece at `(x, y)` in the base orientation.
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: Rotation::North,
        }
    }

    /// Spawn placement for a field of `field_width` columns: `(width / 2, 0)`, unrotated.
    pub fn spawn(kind: PieceKind, field_width: u16) -> Self {
        Self::new(kind, (field_width / 2) as i32, 0)
    }

    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Candidate moved by `(dx, dy)`.
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Candidate turned one quarter (`rotation + 1`).
    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    /// Field coordinates of the four occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        shape(self.kind)
            .cells(self.rotation)
            .map(move |(lx, ly)| (self.x + lx as i32, self.y + ly as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_centered_on_the_top_row() {
        let piece = ActivePiece::spawn(PieceKind::T, 12);
        assert_eq!(piece.x(), 6);
        assert_eq!(piece.y(), 0);
        assert_eq!(piece.rotation(), Rotation::North);
    }

    #[test]
    fn candidates_leave_the_original_alone() {
        let piece = ActivePiece::new(PieceKind::S, 3, 4);
        let moved = piece.shifted(-1, 1);
        assert_eq!((moved.x(), moved.y()), (2, 5));
        assert_eq!((piece.x(), piece.y()), (3, 4));

        let turned = piece.rotated().rotated().rotated().rotated();
        assert_eq!(turned, piece);
    }

    #[test]
    fn cells_are_offset_by_the_box_origin() {
        let piece = ActivePiece::new(PieceKind::O, 6, 0);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(7, 1), (8, 1), (7, 2), (8, 2)]);
    }
}
