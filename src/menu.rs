//! Interactive line-based menu around game sessions.
//!
//! The menu reads from any `BufRead` and writes to any `Write`, and takes the
//! session runner as a closure, so the whole flow runs under test without a
//! terminal.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::AppConfig;
use crate::leaderboard::{Entry, Leaderboard, LeaderboardError};

pub const MENU_TEXT: &str = "\
1. Start game
2. Change text color
3. Leaderboard
4. Controls
5. Exit";

pub const COLOR_TEXT: &str = "\
Choose a color (0 - 15):
0 - Black, 1 - Blue, 2 - Green, 3 - Cyan, 4 - Red, 5 - Magenta, 6 - Yellow, 7 - Gray,
8 - Dark gray, 9 - Light blue, 10 - Light green, 11 - Light cyan, 12 - Light red,
13 - Light magenta, 14 - Light yellow, 15 - White";

pub const CONTROLS_TEXT: &str = "\
CONTROLS:
Left / A / H      move left
Right / D / L     move right
Down / S / J      soft drop
Z / Up / W / K    rotate
Q / Esc           quit the session";

/// Entries shown by the menu's leaderboard option.
pub const MENU_LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    ChangeColor,
    Leaderboard,
    Controls,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Play),
            "2" => Some(MenuChoice::ChangeColor),
            "3" => Some(MenuChoice::Leaderboard),
            "4" => Some(MenuChoice::Controls),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Palette index in `0..16`.
pub fn parse_color(input: &str) -> Option<u8> {
    input.trim().parse().ok().filter(|&c: &u8| c < 16)
}

/// Print `prompt` and read one line. `None` at end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Print the best entries, or a note when there are none.
pub fn write_leaderboard<W: Write>(out: &mut W, entries: &[Entry]) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "The leaderboard is empty.")?;
        return Ok(());
    }
    writeln!(out, "Leaderboard:")?;
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(out, "{:>2}. {:<16} {:>8}", rank + 1, entry.name, entry.score)?;
    }
    Ok(())
}

/// Report a finished session and ask for a name to record.
///
/// Re-prompts on invalid names; an empty line or end of input skips saving.
pub fn record_score<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    board: &Leaderboard,
    score: u32,
) -> Result<()> {
    writeln!(out, "Game over! Score: {}", score)?;
    loop {
        let Some(name) = prompt_line(input, out, "Enter your name for the leaderboard: ")? else {
            return Ok(());
        };
        if name.trim().is_empty() {
            writeln!(out, "Score not recorded.")?;
            return Ok(());
        }
        match board.append(&name, score) {
            Ok(()) => {
                writeln!(out, "Score recorded.")?;
                return Ok(());
            }
            Err(LeaderboardError::InvalidName(_)) => {
                writeln!(out, "Names cannot contain ':'. Try again.")?;
            }
            Err(e) => {
                eprintln!("[Leaderboard] {}", e);
                writeln!(out, "Could not write the leaderboard file.")?;
                return Ok(());
            }
        }
    }
}

/// Run the menu until the player exits or input ends.
pub fn run_menu<R, W, P>(input: &mut R, out: &mut W, config: &mut AppConfig, mut play: P) -> Result<()>
where
    R: BufRead,
    W: Write,
    P: FnMut(&AppConfig) -> Result<u32>,
{
    loop {
        writeln!(out, "{}", MENU_TEXT)?;
        let Some(line) = prompt_line(input, out, "Choose an option: ")? else {
            return Ok(());
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::Play) => {
                let score = play(&*config)?;
                let board = Leaderboard::new(&config.leaderboard_path);
                record_score(input, out, &board, score)?;
            }
            Some(MenuChoice::ChangeColor) => {
                writeln!(out, "{}", COLOR_TEXT)?;
                let Some(line) = prompt_line(input, out, "")? else {
                    return Ok(());
                };
                match parse_color(&line) {
                    Some(color) => config.text_color = color,
                    None => writeln!(out, "Invalid color, keeping {}.", config.text_color)?,
                }
            }
            Some(MenuChoice::Leaderboard) => {
                let board = Leaderboard::new(&config.leaderboard_path);
                match board.top(MENU_LEADERBOARD_SIZE) {
                    Ok(entries) => write_leaderboard(out, &entries)?,
                    Err(e) => {
                        eprintln!("[Leaderboard] {}", e);
                        writeln!(out, "Could not read the leaderboard file.")?;
                    }
                }
            }
            Some(MenuChoice::Controls) => writeln!(out, "{}", CONTROLS_TEXT)?,
            Some(MenuChoice::Exit) => {
                writeln!(out, "Exiting.")?;
                return Ok(());
            }
            None => writeln!(out, "Invalid choice. Try again.")?,
        }
    }
}
