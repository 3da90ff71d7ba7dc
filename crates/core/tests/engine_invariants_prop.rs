//! Property tests for the tick state machine.
//!
//! Random intent streams against random seeds; the invariants below must hold
//! after every tick regardless of what the player does.

use console_tetris_core::{EngineConfig, GameEngine, Phase};
use console_tetris_types::{Cell, Intent};
use proptest::prelude::*;

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::None),
        Just(Intent::Left),
        Just(Intent::Right),
        Just(Intent::SoftDrop),
        Just(Intent::Rotate),
    ]
}

fn walls_intact(engine: &GameEngine) -> bool {
    let field = engine.field();
    let (w, h) = (field.width() as i32, field.height() as i32);
    (0..h).all(|y| field.get(0, y) == Some(Cell::Wall) && field.get(w - 1, y) == Some(Cell::Wall))
        && (0..w).all(|x| field.get(x, h - 1) == Some(Cell::Wall))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_over_random_play(
        seed in any::<u32>(),
        intents in proptest::collection::vec(intent_strategy(), 1..600),
        gravity_every in 1usize..4,
    ) {
        let config = EngineConfig { seed, ..EngineConfig::default() };
        let mut engine = GameEngine::new(config).unwrap();
        let mut last_score = 0;
        let mut last_lines = 0;

        for (i, intent) in intents.into_iter().enumerate() {
            let was_over = engine.is_game_over();
            let cells_before = engine.field().cells().to_vec();

            let snap = engine.tick(intent, i % gravity_every == 0);
            let phase = snap.phase;

            // Game over is terminal and freezes the field.
            if was_over {
                prop_assert_eq!(phase, Phase::GameOver);
                prop_assert_eq!(engine.field().cells(), cells_before.as_slice());
            }

            // Counters only grow; score moves in lock-sized steps.
            prop_assert!(engine.score() >= last_score);
            prop_assert!(engine.lines() >= last_lines);
            prop_assert!(engine.lines() - last_lines <= 4);
            prop_assert!(engine.speed() >= config.min_speed);
            prop_assert!(engine.speed() <= config.initial_speed);
            last_score = engine.score();
            last_lines = engine.lines();

            prop_assert!(walls_intact(&engine));

            match phase {
                Phase::Falling => {
                    // The active piece always occupies free cells.
                    let active = engine.active().unwrap();
                    prop_assert!(engine.field().fit(active).is_some());
                    prop_assert!(!engine.field().cells().contains(&Cell::Clearing));
                }
                Phase::Clearing => {
                    prop_assert!(engine.active().is_none());
                    prop_assert!(!engine.pending_rows().is_empty());
                }
                Phase::GameOver => {}
            }
        }
    }

    #[test]
    fn award_matches_lines_cleared(seed in any::<u32>(), steps in 200usize..1500) {
        let config = EngineConfig { seed, ..EngineConfig::default() };
        let mut engine = GameEngine::new(config).unwrap();
        let mut total = 0u32;
        for i in 0..steps {
            let intent = [Intent::Left, Intent::Right, Intent::SoftDrop, Intent::None][(i / 7) % 4];
            engine.tick(intent, true);
            if let Some(event) = engine.take_last_event() {
                prop_assert_eq!(event.award, 25 + if event.lines_cleared == 0 { 0 } else { 100 << event.lines_cleared });
                total += event.award;
            }
        }
        prop_assert_eq!(engine.score(), total);
    }
}
