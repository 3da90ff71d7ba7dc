//! Leaderboard file - append-only `name: score` lines.
//!
//! Every finished session appends one line. Reading parses what it can and
//! skips the rest, so a hand-edited or truncated file never blocks the game.
//!
//! ```no_run
//! use console_tetris_leaderboard::Leaderboard;
//!
//! let board = Leaderboard::new("leaders.txt");
//! board.append("alice", 1250)?;
//! for entry in board.top(10)? {
//!     println!("{}: {}", entry.name, entry.score);
//! }
//! # Ok::<(), console_tetris_leaderboard::LeaderboardError>(())
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default file name, relative to the working directory.
pub const DEFAULT_LEADERBOARD_PATH: &str = "leaders.txt";

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid player name {0:?}: must be non-empty without ':' or line breaks")]
    InvalidName(String),
}

/// One parsed leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub score: u32,
}

impl Entry {
    /// Parse a `name: score` line. Surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.split_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let score = score.trim().parse().ok()?;
        Some(Self {
            name: name.to_string(),
            score,
        })
    }
}

/// Check a player name, returning it trimmed.
pub fn validate_name(name: &str) -> Result<&str, LeaderboardError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(':') || trimmed.contains(['\n', '\r']) {
        return Err(LeaderboardError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

/// Handle on a leaderboard file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEFAULT_LEADERBOARD_PATH)
    }
}

impl Leaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `name: score`, creating the file if needed.
    pub fn append(&self, name: &str, score: u32) -> Result<(), LeaderboardError> {
        let name = validate_name(name)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        writeln!(file, "{}: {}", name, score).map_err(|source| self.io_error(source))?;
        Ok(())
    }

    /// All entries in file order. A missing file is an empty leaderboard.
    pub fn load(&self) -> Result<Vec<Entry>, LeaderboardError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        let mut entries = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Entry::parse(line) {
                Some(entry) => entries.push(entry),
                None => eprintln!(
                    "[Leaderboard] {}:{}: skipping malformed line {:?}",
                    self.path.display(),
                    lineno + 1,
                    line
                ),
            }
        }
        Ok(entries)
    }

    /// Best `n` entries, highest score first. Ties keep file order.
    pub fn top(&self, n: usize) -> Result<Vec<Entry>, LeaderboardError> {
        let mut entries = self.load()?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(n);
        Ok(entries)
    }

    fn io_error(&self, source: io::Error) -> LeaderboardError {
        LeaderboardError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
