//! Game engine - the per-tick state machine
//!
//! One call to [`GameEngine::tick`] runs to completion:
//!
//! 1. apply the tick's [`Intent`] to the active piece (each move fit-checked)
//! 2. on force-down, try one row of gravity
//! 3. if gravity is blocked: lock, detect full rows, award points
//! 4. with full rows: park in [`Phase::Clearing`] until [`GameEngine::finish_clear`]
//! 5. spawn the next piece; if it does not fit, the session is over
//!
//! Locking and spawning never outlive a call, so the phases a caller can
//! observe are `Falling`, `Clearing` and `GameOver`.

use crate::config::{ConfigError, EngineConfig};
use crate::field::{Field, FullLines};
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::{lock_award, speed_after_spawn};
use crate::snapshot::Snapshot;
use crate::types::{Intent, PieceKind};

/// Observable engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is under control.
    Falling,
    /// Completed rows are marked and waiting to collapse.
    Clearing,
    /// The last spawn did not fit. Terminal.
    GameOver,
}

/// What the most recent lock did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points added by this lock
    pub award: u32,
}

/// Owns the field, the active and next pieces, and the session counters
#[derive(Debug, Clone)]
pub struct GameEngine<S = UniformPieces> {
    config: EngineConfig,
    field: Field,
    source: S,
    active: Option<ActivePiece>,
    next_kind: PieceKind,
    phase: Phase,
    /// Rows marked `Clearing` by the last lock
    pending: FullLines,
    score: u32,
    lines: u32,
    /// Ticks per gravity step
    speed: u32,
    ticks_since_gravity: u32,
    /// Pieces spawned after a lock (the opening piece is not counted)
    piece_count: u32,
    /// Rotate fires only when this is set; it clears while rotate is held.
    rotate_armed: bool,
    last_event: Option<LockEvent>,
}

impl GameEngine<UniformPieces> {
    /// Engine with uniformly random pieces seeded from `config.seed`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, UniformPieces::new(config.seed))
    }
}

impl<S: PieceSource> GameEngine<S> {
    /// Engine drawing its pieces from `source`.
    ///
    /// Draws the opening piece and the first preview, then spawns.
    pub fn with_source(config: EngineConfig, mut source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let first = source.next_kind();
        let next_kind = source.next_kind();
        let field = Field::new(config.width, config.height);
        let active = ActivePiece::spawn(first, config.width);
        let phase = if field.fit(active).is_some() {
            Phase::Falling
        } else {
            Phase::GameOver
        };

        Ok(Self {
            config,
            field,
            source,
            active: Some(active),
            next_kind,
            phase,
            pending: FullLines::new(),
            score: 0,
            lines: 0,
            speed: config.initial_speed,
            ticks_since_gravity: 0,
            piece_count: 0,
            rotate_armed: true,
            last_event: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    pub fn ticks_since_gravity(&self) -> u32 {
        self.ticks_since_gravity
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether marked rows are waiting for [`GameEngine::finish_clear`].
    pub fn has_pending_clears(&self) -> bool {
        self.phase == Phase::Clearing
    }

    /// Rows currently marked `Clearing`, ascending.
    pub fn pending_rows(&self) -> &[usize] {
        &self.pending
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            cells: self.field.cells(),
            width: self.field.width(),
            height: self.field.height(),
            active: self.active,
            next_kind: self.next_kind,
            score: self.score,
            lines: self.lines,
            speed: self.speed,
            piece_count: self.piece_count,
            phase: self.phase,
        }
    }

    /// Advance one tick with engine-side pacing
    ///
    /// Counts the tick and forces gravity once `speed` ticks have passed.
    pub fn step(&mut self, intent: Intent) -> Snapshot<'_> {
        let mut force_down = false;
        if self.phase == Phase::Falling {
            self.ticks_since_gravity += 1;
            force_down = self.ticks_since_gravity >= self.speed;
        }
        self.tick(intent, force_down)
    }

    /// Advance one tick with an externally decided gravity flag
    ///
    /// After game over nothing changes. While rows are pending the tick
    /// collapses them and spawns; its intent is dropped.
    pub fn tick(&mut self, intent: Intent, force_down: bool) -> Snapshot<'_> {
        match self.phase {
            Phase::GameOver => {}
            Phase::Clearing => self.finish_clear(),
            Phase::Falling => {
                self.apply_intent(intent);
                if force_down {
                    self.gravity_step();
                    self.ticks_since_gravity = 0;
                }
            }
        }
        self.snapshot()
    }

    /// Collapse the rows marked by the last lock and spawn the next piece.
    ///
    /// No-op unless the engine is in [`Phase::Clearing`].
    pub fn finish_clear(&mut self) {
        if self.phase != Phase::Clearing {
            return;
        }
        self.field.collapse(&self.pending);
        self.pending.clear();
        self.spawn_next();
    }

    fn apply_intent(&mut self, intent: Intent) {
        if let Some(active) = self.active {
            match intent {
                Intent::None => {}
                Intent::Left => {
                    self.try_adopt(active.shifted(-1, 0));
                }
                Intent::Right => {
                    self.try_adopt(active.shifted(1, 0));
                }
                Intent::SoftDrop => {
                    self.try_adopt(active.shifted(0, 1));
                }
                Intent::Rotate => {
                    if self.rotate_armed {
                        self.try_adopt(active.rotated());
                    }
                }
            }
        }
        self.rotate_armed = intent != Intent::Rotate;
    }

    /// Make `candidate` the active piece if it fits.
    fn try_adopt(&mut self, candidate: ActivePiece) -> bool {
        match self.field.fit(candidate) {
            Some(fitted) => {
                self.active = Some(fitted.into_piece());
                true
            }
            None => false,
        }
    }

    fn gravity_step(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        if !self.try_adopt(active.shifted(0, 1)) {
            self.lock_active();
        }
    }

    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        // The active piece is only ever adopted through a fit, so this holds
        // unless the field was edited under it.
        let Some(fitted) = self.field.fit(active) else {
            self.active = Some(active);
            self.phase = Phase::GameOver;
            return;
        };
        self.field.lock(fitted);

        let rows = self.field.detect_full_lines(active.y());
        let cleared = rows.len() as u32;
        let award = lock_award(cleared);
        self.score = self.score.saturating_add(award);
        self.lines = self.lines.saturating_add(cleared);
        self.last_event = Some(LockEvent {
            kind: active.kind(),
            lines_cleared: cleared,
            award,
        });

        if rows.is_empty() {
            self.spawn_next();
        } else {
            self.pending = rows;
            self.phase = Phase::Clearing;
        }
    }

    fn spawn_next(&mut self) {
        let kind = self.next_kind;
        self.next_kind = self.source.next_kind();
        self.piece_count = self.piece_count.saturating_add(1);
        self.speed = speed_after_spawn(self.speed, self.piece_count, self.config.min_speed);

        let piece = ActivePiece::spawn(kind, self.config.width);
        self.active = Some(piece);
        self.phase = if self.field.fit(piece).is_some() {
            Phase::Falling
        } else {
            Phase::GameOver
        };
    }
}
