//! End-to-end engine scenarios driven only through the public tick API

use console_tetris::core::{EngineConfig, FixedPieces, GameEngine, LockEvent, Phase, PieceSource};
use console_tetris::input::InputHandler;
use crossterm::event::KeyCode;
use console_tetris::types::{Cell, Intent, PieceKind, TICK_MS};

fn fixed(kinds: &[PieceKind]) -> GameEngine<FixedPieces> {
    GameEngine::with_source(EngineConfig::default(), FixedPieces::new(kinds.to_vec())).unwrap()
}

/// Shift the active piece to column `x` without gravity.
fn move_to<S: PieceSource>(engine: &mut GameEngine<S>, x: i32) {
    for _ in 0..32 {
        let current = engine.active().map(|p| p.x()).unwrap();
        if current == x {
            return;
        }
        let intent = if current > x { Intent::Left } else { Intent::Right };
        engine.tick(intent, false);
    }
    panic!("could not reach column {}", x);
}

/// Force gravity until the active piece locks.
fn drop_piece<S: PieceSource>(engine: &mut GameEngine<S>) {
    let before = engine.piece_count();
    for _ in 0..64 {
        engine.tick(Intent::None, true);
        if engine.phase() != Phase::Falling || engine.piece_count() != before {
            return;
        }
    }
    panic!("piece never locked");
}

#[test]
fn five_squares_clear_two_lines() {
    let mut engine = fixed(&[PieceKind::O]);

    for x in [0, 2, 4, 6] {
        move_to(&mut engine, x);
        drop_piece(&mut engine);
        assert_eq!(engine.phase(), Phase::Falling);
    }
    assert_eq!(engine.score(), 4 * 25);

    move_to(&mut engine, 8);
    drop_piece(&mut engine);

    let snap = engine.snapshot();
    assert!(snap.pending_clears());
    assert_eq!(snap.score, 4 * 25 + 25 + 400);
    assert_eq!(snap.lines, 2);
    assert!(snap.active.is_none());
    for x in 1..11 {
        assert_eq!(snap.cell(x, 15), Some(Cell::Clearing));
        assert_eq!(snap.cell(x, 16), Some(Cell::Clearing));
    }
    assert_eq!(
        engine.take_last_event(),
        Some(LockEvent {
            kind: PieceKind::O,
            lines_cleared: 2,
            award: 425
        })
    );

    engine.finish_clear();
    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Falling);
    assert_eq!(engine.field().locked_count(), 0);
    for y in 0..17 {
        for x in 1..11 {
            assert_eq!(snap.cell(x, y), Some(Cell::Empty), "({}, {})", x, y);
        }
    }
    assert_eq!(snap.score, 525);
}

#[test]
fn vertical_bars_clear_four_lines() {
    // Nine bars in columns 1..=9, then one in column 10.
    let mut engine = fixed(&[PieceKind::I]);
    for x in -1..=7 {
        move_to(&mut engine, x);
        drop_piece(&mut engine);
        assert!(!engine.has_pending_clears());
    }
    move_to(&mut engine, 8);
    drop_piece(&mut engine);

    assert_eq!(engine.pending_rows(), &[13, 14, 15, 16]);
    assert_eq!(engine.score(), 9 * 25 + 25 + 1600);
    assert_eq!(engine.lines(), 4);

    // The next tick finishes the clear instead of moving.
    let snap = engine.tick(Intent::Right, true);
    assert_eq!(snap.phase, Phase::Falling);
    assert_eq!(snap.active.map(|p| (p.x(), p.y())), Some((6, 0)));
    assert_eq!(engine.field().locked_count(), 0);
}

#[test]
fn stacked_squares_end_the_game() {
    let mut engine = fixed(&[PieceKind::O]);
    let mut locks = 0;
    while !engine.is_game_over() {
        drop_piece(&mut engine);
        locks += 1;
        assert!(locks <= 8);
    }
    assert_eq!(locks, 8);
    assert_eq!(engine.score(), 200);
    assert!(engine.snapshot().game_over());

    let before = engine.snapshot().cells.to_vec();
    for _ in 0..50 {
        engine.step(Intent::Left);
        engine.tick(Intent::Rotate, true);
    }
    assert_eq!(engine.snapshot().cells, before.as_slice());
    assert_eq!(engine.score(), 200);
}

#[test]
fn step_paces_gravity_by_speed() {
    let mut engine = fixed(&[PieceKind::T]);
    let mut drops = Vec::new();
    for tick in 1..=60 {
        let y = engine.active().unwrap().y();
        engine.step(Intent::None);
        if engine.active().unwrap().y() != y {
            drops.push(tick);
        }
    }
    assert_eq!(drops, vec![20, 40, 60]);
}

#[test]
fn soft_drop_moves_without_resetting_gravity() {
    let mut engine = fixed(&[PieceKind::T]);
    for _ in 0..19 {
        engine.step(Intent::SoftDrop);
    }
    assert_eq!(engine.active().unwrap().y(), 19 - 5);
    // Soft drop is blocked at the bottom; the gravity tick then locks.
    engine.step(Intent::SoftDrop);
    assert_eq!(engine.piece_count(), 1);
}

#[test]
fn same_seed_same_game() {
    let play = |seed: u32| {
        let config = EngineConfig {
            seed,
            ..EngineConfig::default()
        };
        let mut engine = GameEngine::new(config).unwrap();
        let intents = [Intent::Left, Intent::Rotate, Intent::None, Intent::Right, Intent::SoftDrop];
        let mut kinds = Vec::new();
        for i in 0..2000 {
            engine.step(intents[i % intents.len()]);
            if engine.has_pending_clears() {
                engine.finish_clear();
            }
            if let Some(event) = engine.take_last_event() {
                kinds.push(event.kind);
            }
            if engine.is_game_over() {
                break;
            }
        }
        (kinds, engine.score(), engine.snapshot().cells.to_vec())
    };

    assert_eq!(play(77), play(77));
}

#[test]
fn speed_reaches_the_floor_and_stays() {
    let config = EngineConfig {
        height: 60,
        ..EngineConfig::default()
    };
    let mut engine = GameEngine::with_source(config, FixedPieces::repeat(PieceKind::I)).unwrap();
    // Ten bars side by side clear four rows, so the field never fills up.
    let mut column = -1;
    while engine.piece_count() < 120 && !engine.is_game_over() {
        move_to(&mut engine, column);
        drop_piece(&mut engine);
        if engine.has_pending_clears() {
            engine.finish_clear();
        }
        column = if column >= 8 { -1 } else { column + 1 };
    }
    assert!(engine.piece_count() >= 100);
    assert_eq!(engine.speed(), 10);
}

#[test]
fn single_key_tap_moves_one_column() {
    let mut engine = fixed(&[PieceKind::T]);
    let mut input = InputHandler::new();
    let start = engine.active().map(|p| p.x()).unwrap();

    input.handle_key_press(KeyCode::Left);
    for _ in 0..6 {
        input.update(TICK_MS);
        engine.step(input.take_intent());
    }
    assert_eq!(engine.active().map(|p| p.x()), Some(start - 1));
}
