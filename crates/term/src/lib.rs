//! Terminal rendering for console tetris.
//!
//! Sessions render into a simple framebuffer of styled characters which is
//! then flushed to the terminal, rewriting only the cells that changed since
//! the previous frame.
//!
//! - [`fb`]: framebuffer, styles and the 16-color console palette
//! - [`game_view`]: snapshot to framebuffer (field, side panel, overlay)
//! - [`renderer`]: raw mode, alternate screen and diff flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use console_tetris_core as core;
pub use console_tetris_types as types;

pub use fb::{console_color, Cell, CellStyle, FrameBuffer, Rgb, CONSOLE_PALETTE, DEFAULT_TEXT_COLOR};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{term_color, write_changes, write_frame, TerminalRenderer};
