//! Console tetris (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `console_tetris::{core,input,term,leaderboard,types}`
//! and adds the application layer: configuration and the interactive menu.

pub use console_tetris_core as core;
pub use console_tetris_input as input;
pub use console_tetris_leaderboard as leaderboard;
pub use console_tetris_term as term;
pub use console_tetris_types as types;

pub mod config;
pub mod menu;
