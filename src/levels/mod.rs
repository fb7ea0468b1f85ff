//! Level calculation from cumulative XP.
//!
//! Levels follow a doubling schedule: level 1 costs 100 XP, level 2 a further
//! 200, level 3 a further 400, and so on. Reaching level `L` therefore needs
//! `100 * (2^L - 1)` XP in total (100, 300, 700, 1500, 3100, ...).
//!
//! Levels are never stored. They are always derived from the XP record so the
//! two can't drift apart.

use serde::Serialize;

/// XP needed to go from level 0 to level 1.
pub const BASE_LEVEL_COST: u64 = 100;

/// Computes the level reached with `xp` cumulative experience.
///
/// # Examples
///
/// ```
/// use maharlika_bot::levels::calculate_level;
///
/// assert_eq!(calculate_level(0), 0);
/// assert_eq!(calculate_level(99), 0);
/// assert_eq!(calculate_level(100), 1);
/// assert_eq!(calculate_level(300), 2);
/// assert_eq!(calculate_level(2900), 4);
/// ```
pub fn calculate_level(xp: u64) -> u32 {
    let mut remaining = xp;
    let mut level = 0;
    let mut cost = BASE_LEVEL_COST;

    while remaining >= cost {
        remaining -= cost;
        level += 1;
        match cost.checked_mul(2) {
            Some(next) => cost = next,
            // The next cost no longer fits in a u64, so no XP value can pay it.
            None => break,
        }
    }

    level
}

/// A user's level together with the XP it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u64,
}

impl LevelProgress {
    pub fn from_xp(xp: u64) -> Self {
        LevelProgress {
            level: calculate_level(xp),
            xp,
        }
    }
}
