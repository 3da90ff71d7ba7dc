//! Application configuration: environment first, command line on top.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_WIDTH` | 12 | Field width, walls included |
//! | `TETRIS_HEIGHT` | 18 | Field height, bottom wall included |
//! | `TETRIS_SPEED` | 20 | Ticks per gravity step at start |
//! | `TETRIS_SEED` | clock | Piece sequence seed |
//! | `TETRIS_TICK_MS` | 50 | Tick interval |
//! | `TETRIS_LEADERBOARD` | `leaders.txt` | Leaderboard file |
//! | `TETRIS_COLOR` | 7 | Text color, console palette index `0..16` |
//!
//! Unparseable values fall back to the default with a warning on stderr.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};

use crate::core::EngineConfig;
use crate::leaderboard::DEFAULT_LEADERBOARD_PATH;
use crate::term::{console_color, Rgb, CONSOLE_PALETTE, DEFAULT_TEXT_COLOR};
use crate::types::{CLEAR_PAUSE_MS, MIN_SPEED, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub tick_ms: u32,
    /// How long the `Clearing` frame stays on screen
    pub clear_pause_ms: u32,
    pub leaderboard_path: PathBuf,
    /// Console palette index for all text
    pub text_color: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            tick_ms: TICK_MS,
            clear_pause_ms: CLEAR_PAUSE_MS,
            leaderboard_path: PathBuf::from(DEFAULT_LEADERBOARD_PATH),
            text_color: DEFAULT_TEXT_COLOR,
        }
    }
}

impl AppConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            valid: impl Fn(&T) -> bool,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(value) if valid(&value) => Some(value),
                _ => {
                    eprintln!("[Tetris] ignoring {}={:?}, using the default", key, raw);
                    None
                }
            }
        }
        fn any<T>(_: &T) -> bool {
            true
        }

        let defaults = Self::default();
        let mut engine = defaults.engine;
        engine.width = parsed(&lookup, "TETRIS_WIDTH", any).unwrap_or(engine.width);
        engine.height = parsed(&lookup, "TETRIS_HEIGHT", any).unwrap_or(engine.height);
        engine.seed = parsed(&lookup, "TETRIS_SEED", any).unwrap_or_else(clock_seed);
        if let Some(speed) = parsed(&lookup, "TETRIS_SPEED", |&s: &u32| s > 0) {
            engine = with_initial_speed(engine, speed);
        }

        let tick_ms = parsed(&lookup, "TETRIS_TICK_MS", |&ms: &u32| ms > 0).unwrap_or(defaults.tick_ms);

        let leaderboard_path = lookup("TETRIS_LEADERBOARD")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
            .unwrap_or(defaults.leaderboard_path);

        let text_color = parsed(&lookup, "TETRIS_COLOR", |&c: &u8| {
            (c as usize) < CONSOLE_PALETTE.len()
        })
        .unwrap_or(defaults.text_color);

        Self {
            engine,
            tick_ms,
            clear_pause_ms: defaults.clear_pause_ms,
            leaderboard_path,
            text_color,
        }
    }

    /// Layer command-line flags over this config.
    pub fn apply(&mut self, opts: &GameOpts) {
        if let Some(width) = opts.width {
            self.engine.width = width;
        }
        if let Some(height) = opts.height {
            self.engine.height = height;
        }
        if let Some(speed) = opts.speed {
            self.engine = with_initial_speed(self.engine, speed);
        }
        if let Some(seed) = opts.seed {
            self.engine.seed = seed;
        }
        if let Some(tick_ms) = opts.tick_ms.filter(|&ms| ms > 0) {
            self.tick_ms = tick_ms;
        }
        if let Some(path) = &opts.leaderboard {
            self.leaderboard_path = path.clone();
        }
        if let Some(color) = opts.color {
            self.text_color = color;
        }
    }

    /// Text color as RGB; out-of-range indices fall back to the default.
    pub fn text_rgb(&self) -> Rgb {
        console_color(self.text_color).unwrap_or(CONSOLE_PALETTE[DEFAULT_TEXT_COLOR as usize])
    }
}

/// Start speed `speed`; the floor follows when the start is set below it.
fn with_initial_speed(mut engine: EngineConfig, speed: u32) -> EngineConfig {
    engine.initial_speed = speed;
    engine.min_speed = MIN_SPEED.min(speed);
    engine
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

#[derive(Parser, Debug)]
#[command(name = "console-tetris", version, about = "Falling blocks in the terminal")]
pub struct Cli {
    #[command(flatten)]
    pub opts: GameOpts,

    /// Omit to get the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play one session, then record the score.
    Play,
    /// Print the best scores.
    Leaderboard {
        /// How many entries to show.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Print the key bindings.
    Controls,
}

/// Overrides for the environment configuration.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOpts {
    /// Field width, walls included.
    #[arg(long, global = true)]
    pub width: Option<u16>,

    /// Field height, bottom wall included.
    #[arg(long, global = true)]
    pub height: Option<u16>,

    /// Ticks per gravity step at the start of a session.
    #[arg(long, global = true)]
    pub speed: Option<u32>,

    /// Piece sequence seed.
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// Tick interval in milliseconds.
    #[arg(long, value_name = "ms", global = true)]
    pub tick_ms: Option<u32>,

    /// Leaderboard file.
    #[arg(long, value_name = "path", global = true)]
    pub leaderboard: Option<PathBuf>,

    /// Text color, console palette index 0-15.
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..16))]
    pub color: Option<u8>,
}
