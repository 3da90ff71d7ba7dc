//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block simulation: the walled field, the seven
//! piece patterns with closed-form rotation, and the per-tick engine. It has
//! no dependency on terminals, clocks or files. Pacing is the caller's job:
//! call [`GameEngine::step`] every `TICK_MS`, or drive
//! [`GameEngine::tick`] with your own gravity flag.
//!
//! # Module Structure
//!
//! - [`shape`]: 4x4 piece patterns and the rotation index formula
//! - [`field`]: walled grid, fit test, lock, full-row detection and collapse
//! - [`piece`]: the active piece and its candidate moves
//! - [`engine`]: tick state machine, scoring and spawn
//! - [`rng`]: piece sources (seeded uniform, fixed sequence)
//! - [`scoring`]: lock awards and gravity speed-ups
//! - [`config`]: validated engine settings
//!
//! # Rules
//!
//! - **Gravity**: one row every `speed` ticks; `speed` starts at 20 and drops
//!   by one every 10 pieces, down to 10
//! - **Rotation**: one quarter turn per press, no wall kicks
//! - **Lock**: as soon as gravity is blocked
//! - **Scoring**: 25 per lock, plus `100 * 2^n` when `n` rows complete
//! - **Game over**: the freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use console_tetris_core::{EngineConfig, FixedPieces, GameEngine, Phase};
//! use console_tetris_types::{Intent, PieceKind};
//!
//! let mut engine =
//!     GameEngine::with_source(EngineConfig::default(), FixedPieces::repeat(PieceKind::O))?;
//!
//! engine.tick(Intent::Left, false);
//! let snap = engine.tick(Intent::None, true);
//! assert_eq!(snap.phase, Phase::Falling);
//! assert_eq!(snap.active.map(|p| (p.x(), p.y())), Some((5, 1)));
//! # Ok::<(), console_tetris_core::ConfigError>(())
//! ```

pub mod config;
pub mod engine;
pub mod field;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use console_tetris_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use engine::{GameEngine, LockEvent, Phase};
pub use field::{Field, Fitted, FullLines};
pub use piece::ActivePiece;
pub use rng::{FixedPieces, PieceSource, SimpleRng, UniformPieces};
pub use scoring::{lock_award, speed_after_spawn};
pub use shape::{rotate_index, rotate_index_raw, shape, PieceShape};
pub use snapshot::Snapshot;
