//! Shared types module - plain data used by every layer of the game
//!
//! Everything here is dependency-free data: piece kinds, rotation states,
//! per-tick intents, field cell values and the gameplay constants of the
//! reference ruleset. The simulation core, the input mapper, the renderer and
//! the leaderboard writer all speak in these types.
//!
//! # Field Dimensions
//!
//! The reference playing field is 12 columns by 18 rows. The leftmost column,
//! the rightmost column and the bottom row are permanent walls, leaving a
//! 10x17 interior for pieces.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed pacing interval between engine ticks |
//! | `INITIAL_SPEED` | 20 | Ticks per gravity step at session start |
//! | `MIN_SPEED` | 10 | Gravity never gets faster than this |
//! | `SPEED_UP_EVERY` | 10 | Pieces between speed-ups |
//! | `CLEAR_PAUSE_MS` | 400 | How long a frontend holds the marked rows |
//!
//! # Examples
//!
//! ```
//! use console_tetris_types::{Cell, Intent, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::from_index(2), Some(PieceKind::O));
//! assert_eq!(PieceKind::O.letter(), 'C');
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Rotation::from_quarter_turns(-1), Rotation::West);
//!
//! assert_eq!(Intent::default(), Intent::None);
//! assert!(Cell::Wall.is_filled());
//! ```

/// Reference field width in cells, walls included.
pub const FIELD_WIDTH: u16 = 12;

/// Reference field height in cells, bottom wall included.
pub const FIELD_HEIGHT: u16 = 18;

/// Side length of the square box every piece pattern lives in.
pub const PIECE_SPAN: usize = 4;

/// Fixed pacing interval between ticks (milliseconds).
pub const TICK_MS: u32 = 50;

/// Ticks per gravity step when a session starts.
pub const INITIAL_SPEED: u32 = 20;

/// Floor for the ticks-per-gravity-step counter.
pub const MIN_SPEED: u32 = 10;

/// Speed increases once every this many spawned pieces.
pub const SPEED_UP_EVERY: u32 = 10;

/// Points awarded for every locked piece.
pub const LOCK_AWARD: u32 = 25;

/// Line clear bonus base, multiplied by `2^lines`.
pub const LINE_BONUS_BASE: u32 = 100;

/// Pause a frontend may hold the `Clearing` frame for (milliseconds).
pub const CLEAR_PAUSE_MS: u32 = 400;

/// The seven tetromino kinds
///
/// The discriminant order is significant: it is the index used for locked
/// cells and for the display letter (`I` is `'A'`, `L` is `'G'`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Straight bar
    I,
    /// T shape
    T,
    /// 2x2 square
    O,
    /// Z shape
    Z,
    /// S shape
    S,
    /// L shape
    L,
    /// J shape
    J,
}

impl PieceKind {
    /// All kinds in index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Index of this kind in `0..7`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind for an index in `0..7`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display letter, `'A'` for index 0 up to `'G'` for index 6.
    pub fn letter(self) -> char {
        (b'A' + self.index() as u8) as char
    }
}

/// Quarter-turn rotation states
///
/// - **North**: base orientation (state 0)
/// - **East**: one quarter turn (state 1)
/// - **South**: two quarter turns (state 2)
/// - **West**: three quarter turns (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for any number of quarter turns, reduced mod 4.
    pub fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Next state in rotation order (`state + 1`)
    ///
    /// # Examples
    ///
    /// ```
    /// use console_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }
}

/// Player intent for a single tick
///
/// Exactly one intent is handed to the engine per tick. Edge-triggering of
/// `Rotate` (one turn per press) is done by the engine, so an input provider
/// may keep reporting a held rotate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Nothing held
    #[default]
    None,
    /// Shift one column left
    Left,
    /// Shift one column right
    Right,
    /// Move one row down
    SoftDrop,
    /// Turn one quarter
    Rotate,
}

/// A cell of the playing field
///
/// - `Empty`: free space
/// - `Wall`: permanent border (left column, right column, bottom row)
/// - `Locked(kind)`: part of a piece that has locked
/// - `Clearing`: interior of a completed row waiting to collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Locked(PieceKind),
    Clearing,
}

impl Cell {
    /// True for everything except `Empty`.
    pub fn is_filled(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// Display glyph: `' '`, `'#'`, the piece letter, or `'='`.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Locked(kind) => kind.letter(),
            Cell::Clearing => '=',
        }
    }
}
