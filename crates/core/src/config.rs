//! Engine configuration
//!
//! The defaults reproduce the reference scenario: a 12x18 field, gravity every
//! 20 ticks speeding up to every 10 ticks.

use thiserror::Error;

use crate::types::{FIELD_HEIGHT, FIELD_WIDTH, INITIAL_SPEED, MIN_SPEED, PIECE_SPAN};

/// Smallest width where every kind fits at the spawn column `width / 2`.
pub const MIN_FIELD_WIDTH: u16 = 8;

/// Smallest height that leaves a full piece box above the floor.
pub const MIN_FIELD_HEIGHT: u16 = PIECE_SPAN as u16 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field width {0} is below the minimum of {}", MIN_FIELD_WIDTH)]
    FieldTooNarrow(u16),
    #[error("field height {0} is below the minimum of {}", MIN_FIELD_HEIGHT)]
    FieldTooShort(u16),
    #[error("speed must be at least one tick per gravity step")]
    ZeroSpeed,
    #[error("minimum speed {min} is above the initial speed {initial}")]
    FloorAboveInitial { initial: u32, min: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Columns, walls included
    pub width: u16,
    /// Rows, bottom wall included
    pub height: u16,
    /// Ticks per gravity step at the start of a session
    pub initial_speed: u32,
    /// Floor for the ticks-per-step counter
    pub min_speed: u32,
    /// Seed for the default uniform piece source
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            initial_speed: INITIAL_SPEED,
            min_speed: MIN_SPEED,
            seed: 1,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_FIELD_WIDTH {
            return Err(ConfigError::FieldTooNarrow(self.width));
        }
        if self.height < MIN_FIELD_HEIGHT {
            return Err(ConfigError::FieldTooShort(self.height));
        }
        if self.initial_speed == 0 || self.min_speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.min_speed > self.initial_speed {
            return Err(ConfigError::FloorAboveInitial {
                initial: self.initial_speed,
                min: self.min_speed,
            });
        }
        Ok(())
    }
}
