//! Held-key tracker for terminal environments.
//!
//! A fresh press yields its intent for exactly one tick. The key then stays
//! held (silently) until it is released or until no press/repeat has been seen
//! for `key_release_timeout_ms`. Only a key kept alive by autorepeat past
//! `repeat_delay_ms` hands its intent to the engine on every tick. A held
//! rotate is reported every tick since the engine turns once per hold.
//!
//! Most terminals never report releases, so a single tap must not outlive the
//! release timeout; the repeat delay is longer than that timeout for this
//! reason.

use crossterm::event::KeyCode;

use crate::map::intent_for_key;
use crate::types::Intent;

// Slightly longer than typical autorepeat intervals, so a held key stays held
// between repeats while a single tap lets go quickly.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

// Must stay above the release timeout.
const DEFAULT_REPEAT_DELAY_MS: u32 = 200;

/// Tracks the held intent across ticks.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Intent,
    /// Press not yet handed to the engine
    fresh: Option<Intent>,
    /// Milliseconds since the held key was first pressed
    held_for_ms: u32,
    /// Milliseconds since the last press or repeat of the held key
    quiet_for_ms: u32,
    key_release_timeout_ms: u32,
    repeat_delay_ms: u32,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: Intent::None,
            fresh: None,
            held_for_ms: 0,
            quiet_for_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn with_repeat_delay_ms(mut self, delay_ms: u32) -> Self {
        self.repeat_delay_ms = delay_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn repeat_delay_ms(&self) -> u32 {
        self.repeat_delay_ms
    }

    /// Record a press (or autorepeat). The latest mapped key wins.
    ///
    /// A repeat of the held key only keeps it alive; any other key starts a
    /// fresh press. Returns the intent the key maps to, `None` for unmapped
    /// keys.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Intent> {
        let intent = intent_for_key(code)?;
        if intent != self.held {
            self.held = intent;
            self.fresh = Some(intent);
            self.held_for_ms = 0;
        }
        self.quiet_for_ms = 0;
        Some(intent)
    }

    /// Record a release. Only releasing the held key clears it.
    ///
    /// A press not yet consumed still reaches the engine.
    pub fn handle_key_release(&mut self, code: KeyCode) {
        if intent_for_key(code) == Some(self.held) {
            self.release();
        }
    }

    /// Advance the hold and auto-release timers by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) {
        if self.held == Intent::None {
            return;
        }
        self.held_for_ms = self.held_for_ms.saturating_add(elapsed_ms);
        self.quiet_for_ms = self.quiet_for_ms.saturating_add(elapsed_ms);
        if self.quiet_for_ms > self.key_release_timeout_ms {
            self.release();
        }
    }

    /// Intent to hand to the engine this tick.
    ///
    /// Consumes a pending press; otherwise repeats the held key once it has
    /// been held past the repeat delay.
    pub fn take_intent(&mut self) -> Intent {
        if let Some(intent) = self.fresh.take() {
            return intent;
        }
        // The engine turns once per held rotate, so Rotate passes straight through.
        let repeating = self.held_for_ms >= self.repeat_delay_ms || self.held == Intent::Rotate;
        if self.held != Intent::None && repeating {
            self.held
        } else {
            Intent::None
        }
    }

    /// The key currently considered held, whether or not it repeats yet.
    pub fn held(&self) -> Intent {
        self.held
    }

    /// Forget any held key (e.g. when a session starts).
    pub fn reset(&mut self) {
        self.release();
        self.fresh = None;
    }

    fn release(&mut self) {
        self.held = Intent::None;
        self.held_for_ms = 0;
        self.quiet_for_ms = 0;
    }
}
