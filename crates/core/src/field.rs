//! Field module - the bounded playing grid
//!
//! The field is a `width x height` grid of [`Cell`]s in a flat row-major vector.
//! The left column, right column and bottom row are walls for the whole session.
//! Coordinates: `(x, y)` with `x` growing right and `y` growing down; row 0 is
//! the top.
//!
//! [`Field::fits_at`] is the single authority on whether a piece may occupy a
//! placement. Locking is only possible through a [`Fitted`] token returned by
//! [`Field::fit`], so a lock can never skip the fit test.

use std::fmt;

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::shape::shape;
use crate::types::{Cell, PieceKind, Rotation, PIECE_SPAN};

/// Rows reported by one full-line scan (at most one piece span).
pub type FullLines = ArrayVec<usize, PIECE_SPAN>;

/// Proof that a piece fitted the field at its placement.
///
/// Only [`Field::fit`] creates one; [`Field::lock`] consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Fitted(ActivePiece);

impl Fitted {
    /// The placement that was checked.
    pub fn piece(&self) -> ActivePiece {
        self.0
    }

    pub fn into_piece(self) -> ActivePiece {
        self.0
    }
}

const MIN_WIDTH: u16 = 3;
const MIN_HEIGHT: u16 = 2;

/// The playing grid
#[derive(Clone, PartialEq, Eq)]
pub struct Field {
    width: u16,
    height: u16,
    /// Row-major cells (`y * width + x`)
    cells: Vec<Cell>,
}

impl Field {
    /// Create a field with walls on the left, right and bottom edges.
    ///
    /// Dimensions are raised to at least 3x2 so every row keeps two walls
    /// and one interior cell.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(MIN_WIDTH);
        let height = height.max(MIN_HEIGHT);
        let w = width as usize;
        let h = height as usize;
        let mut cells = vec![Cell::Empty; w * h];
        for y in 0..h {
            for x in 0..w {
                if x == 0 || x + 1 == w || y + 1 == h {
                    cells[y * w + x] = Cell::Wall;
                }
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell at `(x, y)`, `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrite an interior cell. Walls and out-of-bounds writes are refused.
    ///
    /// Used to prepare positions in tests and tools; gameplay only writes
    /// through [`Field::lock`] and the clear operations.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !self.is_interior(x, y) {
            return false;
        }
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `(x, y)` is inside the walls.
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        x >= 1 && x + 1 < self.width as i32 && y >= 0 && y + 1 < self.height as i32
    }

    /// Whether `kind` turned to `rotation` fits with its box at `(x, y)`
    ///
    /// Occupied cells that land outside the grid are not tested, so a piece
    /// may hang above row 0. The walls keep pieces from leaving sideways or
    /// through the bottom.
    pub fn fits_at(&self, kind: PieceKind, rotation: Rotation, x: i32, y: i32) -> bool {
        shape(kind).cells(rotation).all(|(lx, ly)| {
            match self.get(x + lx as i32, y + ly as i32) {
                Some(cell) => cell == Cell::Empty,
                None => true,
            }
        })
    }

    /// Fit test that hands back a lock token on success.
    pub fn fit(&self, piece: ActivePiece) -> Option<Fitted> {
        self.fits_at(piece.kind(), piece.rotation(), piece.x(), piece.y())
            .then_some(Fitted(piece))
    }

    /// Write `Locked(kind)` into every occupied cell of a fitted piece.
    ///
    /// Cells above the top edge are dropped. Returns the number of cells written.
    pub fn lock(&mut self, fitted: Fitted) -> usize {
        let piece = fitted.into_piece();
        let mut written = 0;
        for (lx, ly) in shape(piece.kind()).cells(piece.rotation()) {
            if let Some(i) = self.index(piece.x() + lx as i32, piece.y() + ly as i32) {
                debug_assert_eq!(self.cells[i], Cell::Empty, "lock over a filled cell");
                self.cells[i] = Cell::Locked(piece.kind());
                written += 1;
            }
        }
        written
    }

    /// Whether every interior cell of row `y` is filled.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y + 1 >= self.height as usize {
            return false;
        }
        let w = self.width as usize;
        let start = y * w;
        self.cells[start + 1..start + w - 1]
            .iter()
            .all(|cell| cell.is_filled())
    }

    /// Find and mark the full rows of the piece span starting at `first_row`
    ///
    /// Scans `first_row..first_row + 4`, skipping rows above the top and the
    /// bottom wall row. Each full row has its interior overwritten with
    /// `Clearing` right away. Rows come back in ascending order.
    pub fn detect_full_lines(&mut self, first_row: i32) -> FullLines {
        let mut rows = FullLines::new();
        let w = self.width as usize;
        for y in first_row..first_row + PIECE_SPAN as i32 {
            if y < 0 || y + 1 >= self.height as i32 {
                continue;
            }
            let y = y as usize;
            if self.is_row_full(y) {
                let start = y * w;
                self.cells[start + 1..start + w - 1].fill(Cell::Clearing);
                rows.push(y);
            }
        }
        rows
    }

    /// Remove each listed row, shifting everything above it down by one
    ///
    /// Rows are processed one after another with their original indices.
    /// Feed them in ascending order (as [`Field::detect_full_lines`] returns
    /// them): removing an upper row never moves a lower one.
    pub fn collapse(&mut self, rows: &[usize]) {
        let w = self.width as usize;
        for &row in rows {
            if row + 1 >= self.height as usize {
                continue;
            }
            for y in (1..=row).rev() {
                let src = (y - 1) * w;
                self.cells.copy_within(src + 1..src + w - 1, y * w + 1);
            }
            self.cells[1..w - 1].fill(Cell::Empty);
        }
    }

    /// Count of cells holding `Locked`.
    pub fn locked_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Locked(_)))
            .count()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field {}x{}", self.width, self.height)?;
        for row in self.cells.chunks(self.width as usize) {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fill_row(field: &mut Field, y: i32) {
        for x in 1..field.width() as i32 - 1 {
            field.set(x, y, Cell::Locked(PieceKind::I));
        }
    }

    #[test]
    fn degenerate_sizes_are_raised() {
        let mut field = Field::new(0, 1);
        assert_eq!((field.width(), field.height()), (3, 2));
        field.set(1, 0, Cell::Locked(PieceKind::O));
        let rows = field.detect_full_lines(0);
        assert_eq!(rows.as_slice(), &[0]);
        field.collapse(&rows);
        assert_eq!(field.get(1, 0), Some(Cell::Empty));
        assert_eq!(field.get(1, 1), Some(Cell::Wall));
    }

    #[test]
    fn walls_on_three_sides() {
        let field = Field::new(12, 18);
        for y in 0..18 {
            assert_eq!(field.get(0, y), Some(Cell::Wall));
            assert_eq!(field.get(11, y), Some(Cell::Wall));
        }
        for x in 0..12 {
            assert_eq!(field.get(x, 17), Some(Cell::Wall));
        }
        for y in 0..17 {
            for x in 1..11 {
                assert_eq!(field.get(x, y), Some(Cell::Empty));
            }
        }
        assert_eq!(field.get(-1, 0), None);
        assert_eq!(field.get(0, 18), None);
    }

    #[test]
    fn set_refuses_walls() {
        let mut field = Field::new(12, 18);
        assert!(!field.set(0, 3, Cell::Empty));
        assert!(!field.set(5, 17, Cell::Empty));
        assert!(field.set(5, 16, Cell::Locked(PieceKind::T)));
        assert_eq!(field.get(5, 16), Some(Cell::Locked(PieceKind::T)));
    }

    #[test]
    fn every_kind_fits_at_spawn_on_empty_field() {
        let field = Field::new(12, 18);
        for kind in PieceKind::ALL {
            assert!(field.fits_at(kind, Rotation::North, 6, 0), "{:?}", kind);
        }
    }

    #[test]
    fn walls_reject_placements() {
        let field = Field::new(12, 18);
        // Vertical bar sits in box column 2.
        assert!(field.fits_at(PieceKind::I, Rotation::North, -1, 0));
        assert!(!field.fits_at(PieceKind::I, Rotation::North, -2, 0));
        assert!(field.fits_at(PieceKind::I, Rotation::North, 8, 0));
        assert!(!field.fits_at(PieceKind::I, Rotation::North, 9, 0));
        // Bottom wall.
        assert!(field.fits_at(PieceKind::I, Rotation::North, 5, 13));
        assert!(!field.fits_at(PieceKind::I, Rotation::North, 5, 14));
    }

    #[test]
    fn locked_cells_reject_placements() {
        let mut field = Field::new(12, 18);
        field.set(7, 2, Cell::Locked(PieceKind::Z));
        // O occupies box (1..=2, 1..=2).
        assert!(!field.fits_at(PieceKind::O, Rotation::North, 6, 1));
        assert!(field.fits_at(PieceKind::O, Rotation::North, 6, 2));
    }

    #[test]
    fn clearing_cells_reject_placements() {
        let mut field = Field::new(12, 18);
        field.set(3, 5, Cell::Clearing);
        assert!(!field.fits_at(PieceKind::O, Rotation::North, 2, 3));
    }

    #[test]
    fn pieces_may_hang_above_the_top() {
        let field = Field::new(12, 18);
        assert!(field.fits_at(PieceKind::I, Rotation::North, 4, -3));
    }

    #[test]
    fn lock_writes_exactly_the_rotated_cells() {
        let mut field = Field::new(12, 18);
        let piece = ActivePiece::new(PieceKind::L, 4, 10).with_rotation(Rotation::East);
        let fitted = field.fit(piece).expect("fits");
        assert_eq!(field.lock(fitted), 4);
        assert_eq!(field.locked_count(), 4);
        for (lx, ly) in shape(PieceKind::L).cells(Rotation::East) {
            assert_eq!(
                field.get(4 + lx as i32, 10 + ly as i32),
                Some(Cell::Locked(PieceKind::L))
            );
        }
    }

    #[test]
    fn lock_drops_cells_above_the_top() {
        let mut field = Field::new(12, 18);
        let piece = ActivePiece::new(PieceKind::I, 4, -2);
        let fitted = field.fit(piece).expect("fits");
        assert_eq!(field.lock(fitted), 2);
    }

    #[test]
    fn fit_refuses_blocked_placements() {
        let mut field = Field::new(12, 18);
        field.set(7, 1, Cell::Locked(PieceKind::T));
        assert!(field.fit(ActivePiece::new(PieceKind::O, 6, 0)).is_none());
    }

    #[test]
    fn full_row_is_marked_and_reported() {
        let mut field = Field::new(12, 18);
        fill_row(&mut field, 16);
        let rows = field.detect_full_lines(13);
        assert_eq!(rows.as_slice(), &[16]);
        for x in 1..11 {
            assert_eq!(field.get(x, 16), Some(Cell::Clearing));
        }
        assert_eq!(field.get(0, 16), Some(Cell::Wall));
        assert_eq!(field.get(11, 16), Some(Cell::Wall));
    }

    #[test]
    fn one_gap_keeps_a_row() {
        let mut field = Field::new(12, 18);
        fill_row(&mut field, 16);
        field.set(10, 16, Cell::Empty);
        assert!(field.detect_full_lines(13).is_empty());
        assert_eq!(field.get(9, 16), Some(Cell::Locked(PieceKind::I)));
    }

    #[test]
    fn bottom_wall_is_never_reported() {
        let mut field = Field::new(12, 18);
        assert!(field.detect_full_lines(14).is_empty());
        assert!(!field.is_row_full(17));
    }

    #[test]
    fn rows_outside_the_span_are_ignored() {
        let mut field = Field::new(12, 18);
        fill_row(&mut field, 16);
        assert!(field.detect_full_lines(10).is_empty());
        assert!(field.is_row_full(16));
    }

    #[test]
    fn collapse_shifts_rows_above_down() {
        let mut field = Field::new(12, 18);
        fill_row(&mut field, 16);
        field.set(4, 15, Cell::Locked(PieceKind::S));
        field.set(2, 0, Cell::Locked(PieceKind::T));
        let rows = field.detect_full_lines(13);
        field.collapse(&rows);

        assert_eq!(field.get(4, 16), Some(Cell::Locked(PieceKind::S)));
        assert_eq!(field.get(4, 15), Some(Cell::Empty));
        assert_eq!(field.get(2, 1), Some(Cell::Locked(PieceKind::T)));
        assert_eq!(field.get(2, 0), Some(Cell::Empty));
        assert_eq!(field.get(0, 16), Some(Cell::Wall));
        assert_eq!(field.locked_count(), 2);
    }

    #[test]
    fn collapse_of_two_adjacent_rows_shifts_by_two() {
        let mut field = Field::new(12, 18);
        fill_row(&mut field, 15);
        fill_row(&mut field, 16);
        field.set(3, 14, Cell::Locked(PieceKind::J));
        let rows = field.detect_full_lines(13);
        assert_eq!(rows.as_slice(), &[15, 16]);
        field.collapse(&rows);

        assert_eq!(field.get(3, 16), Some(Cell::Locked(PieceKind::J)));
        assert_eq!(field.locked_count(), 1);
        for x in 1..11 {
            assert_ne!(field.get(x, 15), Some(Cell::Clearing));
            assert_ne!(field.get(x, 16), Some(Cell::Clearing));
        }
    }

    #[test]
    fn collapse_of_separated_rows_keeps_the_middle_row() {
        let mut field = Field::new(12, 18);
        fill_row(&mut field, 14);
        fill_row(&mut field, 16);
        // Row 15 has a single block, row 13 a marker above everything.
        field.set(5, 15, Cell::Locked(PieceKind::Z));
        field.set(8, 13, Cell::Locked(PieceKind::O));
        let rows = field.detect_full_lines(13);
        assert_eq!(rows.as_slice(), &[14, 16]);
        field.collapse(&rows);

        // Row 15 moves down one (only row 16 was below it); row 13 moves two.
        assert_eq!(field.get(5, 16), Some(Cell::Locked(PieceKind::Z)));
        assert_eq!(field.get(8, 15), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(field.locked_count(), 2);
    }

    proptest! {
        #[test]
        fn row_is_full_iff_no_interior_gap(gaps in proptest::collection::vec(any::<bool>(), 10)) {
            let mut field = Field::new(12, 18);
            for (i, gap) in gaps.iter().enumerate() {
                if !gap {
                    field.set(i as i32 + 1, 16, Cell::Locked(PieceKind::T));
                }
            }
            let expected = gaps.iter().all(|g| !g);
            let rows = field.detect_full_lines(13);
            prop_assert_eq!(rows.contains(&16), expected);
        }
    }
}
