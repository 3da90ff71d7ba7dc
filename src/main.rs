//! Console tetris runner (default binary).
//!
//! Without a subcommand this shows the line-based menu on stdin/stdout.
//! Sessions run in the alternate screen with crossterm input and the
//! framebuffer renderer.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use console_tetris::config::{AppConfig, Cli, Command};
use console_tetris::core::GameEngine;
use console_tetris::input::{should_quit, InputHandler};
use console_tetris::leaderboard::Leaderboard;
use console_tetris::menu::{self, CONTROLS_TEXT};
use console_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// How long the final frame stays up unless a key is pressed.
const GAME_OVER_HOLD: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    config.apply(&cli.opts);
    config
        .engine
        .validate()
        .context("invalid game configuration")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match cli.command {
        None => menu::run_menu(&mut input, &mut out, &mut config, play),
        Some(Command::Play) => {
            let score = play(&config)?;
            let board = Leaderboard::new(&config.leaderboard_path);
            menu::record_score(&mut input, &mut out, &board, score)
        }
        Some(Command::Leaderboard { top }) => {
            let entries = Leaderboard::new(&config.leaderboard_path).top(top)?;
            menu::write_leaderboard(&mut out, &entries)
        }
        Some(Command::Controls) => {
            println!("{}", CONTROLS_TEXT);
            Ok(())
        }
    }
}

/// Run one session in the alternate screen and return the final score.
fn play(config: &AppConfig) -> Result<u32> {
    let mut engine = GameEngine::new(config.engine)?;

    eprintln!(
        "[Tetris] session start: {}x{} field, speed {}, seed {}",
        config.engine.width, config.engine.height, config.engine.initial_speed, config.engine.seed
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    eprintln!(
        "[Tetris] session over: score {}, lines {}, pieces {}",
        engine.score(),
        engine.lines(),
        engine.piece_count()
    );
    Ok(engine.score())
}

fn run(term: &mut TerminalRenderer, engine: &mut GameEngine, config: &AppConfig) -> Result<()> {
    let view = GameView::default().with_text_color(config.text_rgb());
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let clear_pause = Duration::from_millis(config.clear_pause_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&engine.snapshot(), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        if engine.is_game_over() {
            wait_for_key(GAME_OVER_HOLD)?;
            return Ok(());
        }

        // Hold the marked rows on screen, then collapse them.
        if engine.has_pending_clears() {
            std::thread::sleep(clear_pause);
            engine.finish_clear();
            last_tick = Instant::now();
            continue;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        input.handle_key_press(key.code);
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            input.update(config.tick_ms);
            engine.step(input.take_intent());
        }
    }
}

/// Block until a key press or `limit` passes.
fn wait_for_key(limit: Duration) -> Result<()> {
    let deadline = Instant::now() + limit;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !event::poll(remaining)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
