//! Scoring module - lock awards and gravity speed-ups
//!
//! Every lock pays a flat `LOCK_AWARD`. A lock that completes rows also pays
//! `LINE_BONUS_BASE * 2^lines`, so one row is worth 25 + 200 and four rows
//! 25 + 1600.

use crate::types::{LINE_BONUS_BASE, LOCK_AWARD, SPEED_UP_EVERY};

/// Points for one lock that cleared `lines` rows.
pub fn lock_award(lines: u32) -> u32 {
    if lines == 0 {
        return LOCK_AWARD;
    }
    let bonus = LINE_BONUS_BASE.saturating_mul(1u32.checked_shl(lines).unwrap_or(u32::MAX));
    LOCK_AWARD.saturating_add(bonus)
}

/// Speed after the `piece_count`-th spawn.
///
/// Every `SPEED_UP_EVERY` pieces the ticks-per-step drop by one, never below
/// `min_speed`.
pub fn speed_after_spawn(speed: u32, piece_count: u32, min_speed: u32) -> u32 {
    if piece_count > 0 && piece_count % SPEED_UP_EVERY == 0 && speed > min_speed {
        speed - 1
    } else {
        speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{INITIAL_SPEED, MIN_SPEED};

    #[test]
    fn lock_awards() {
        assert_eq!(lock_award(0), 25);
        assert_eq!(lock_award(1), 225);
        assert_eq!(lock_award(2), 425);
        assert_eq!(lock_award(3), 825);
        assert_eq!(lock_award(4), 1625);
    }

    #[test]
    fn lock_award_saturates() {
        assert_eq!(lock_award(40), u32::MAX);
    }

    #[test]
    fn speed_steps_every_tenth_piece() {
        let mut speed = INITIAL_SPEED;
        for count in 1..=9 {
            speed = speed_after_spawn(speed, count, MIN_SPEED);
        }
        assert_eq!(speed, 20);
        speed = speed_after_spawn(speed, 10, MIN_SPEED);
        assert_eq!(speed, 19);
    }

    #[test]
    fn speed_never_drops_below_floor() {
        let mut speed = INITIAL_SPEED;
        for count in 1..=1000 {
            speed = speed_after_spawn(speed, count, MIN_SPEED);
        }
        assert_eq!(speed, MIN_SPEED);
    }
}
