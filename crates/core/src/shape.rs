//! Shape module - tetromino occupancy patterns and rotation indexing
//!
//! Every kind is a 4x4 occupancy pattern in one base orientation. Rotation is
//! pure geometry shared by all kinds: [`rotate_index`] maps a local cell of the
//! rotated box back to the cell of the base pattern that lands there.

use crate::types::{PieceKind, Rotation, PIECE_SPAN};

/// Number of cells in a 4x4 piece box.
pub const BOX_CELLS: usize = PIECE_SPAN * PIECE_SPAN;

/// Immutable description of one tetromino kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    kind: PieceKind,
    occupancy: [bool; BOX_CELLS],
}

impl PieceShape {
    /// Build a shape from a 16 character row-major pattern (`'X'` = occupied).
    const fn from_pattern(kind: PieceKind, pattern: &[u8; BOX_CELLS]) -> Self {
        let mut occupancy = [false; BOX_CELLS];
        let mut i = 0;
        while i < BOX_CELLS {
            occupancy[i] = pattern[i] == b'X';
            i += 1;
        }
        Self { kind, occupancy }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Base-orientation occupancy, row-major `y * 4 + x`.
    pub fn occupancy(&self) -> &[bool; BOX_CELLS] {
        &self.occupancy
    }

    /// Whether local cell `(x, y)` of the box is occupied after `rotation`.
    #[inline(always)]
    pub fn is_occupied(&self, local_x: usize, local_y: usize, rotation: Rotation) -> bool {
        self.occupancy[rotate_index(local_x, local_y, rotation)]
    }

    /// Iterate the occupied local cells `(x, y)` for `rotation`, row by row.
    pub fn cells(&self, rotation: Rotation) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..PIECE_SPAN).flat_map(move |local_y| {
            (0..PIECE_SPAN)
                .filter(move |&local_x| self.is_occupied(local_x, local_y, rotation))
                .map(move |local_x| (local_x, local_y))
        })
    }
}

/// Shape arena, indexed by [`PieceKind::index`].
static SHAPES: [PieceShape; 7] = [
    PieceShape::from_pattern(PieceKind::I, b"..X...X...X...X."),
    PieceShape::from_pattern(PieceKind::T, b"..X..XX...X....."),
    PieceShape::from_pattern(PieceKind::O, b".....XX..XX....."),
    PieceShape::from_pattern(PieceKind::Z, b"..X..XX..X......"),
    PieceShape::from_pattern(PieceKind::S, b".X...XX...X....."),
    PieceShape::from_pattern(PieceKind::L, b".X...X...XX....."),
    PieceShape::from_pattern(PieceKind::J, b"..X...X..XX....."),
];

/// Get the immutable shape for a kind
pub fn shape(kind: PieceKind) -> &'static PieceShape {
    &SHAPES[kind.index()]
}

/// Index into a base pattern for local cell `(x, y)` of a rotated box
///
/// The four closed forms are the 0/90/180/270 degree index permutations of a
/// 4x4 grid. `local_x` and `local_y` must be in `0..4`.
#[inline(always)]
pub fn rotate_index(local_x: usize, local_y: usize, rotation: Rotation) -> usize {
    debug_assert!(local_x < PIECE_SPAN && local_y < PIECE_SPAN);
    match rotation {
        Rotation::North => local_y * 4 + local_x,
        Rotation::East => 12 + local_y - local_x * 4,
        Rotation::South => 15 - local_y * 4 - local_x,
        Rotation::West => 3 - local_y + local_x * 4,
    }
}

/// [`rotate_index`] for a raw integer rotation state (any sign, taken mod 4).
pub fn rotate_index_raw(local_x: usize, local_y: usize, state: i32) -> usize {
    rotate_index(local_x, local_y, Rotation::from_quarter_turns(state))
}
