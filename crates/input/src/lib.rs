//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`] values and keeps
//! track of which intent is held, including on terminals that never report
//! key releases.

pub mod handler;
pub mod map;

pub use console_tetris_types as types;

pub use handler::InputHandler;
pub use map::{intent_for_key, should_quit};
