//! Records persisted in the XP and rank-role stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::RoleId;

/// Experience points awarded for each message.
pub const XP_PER_MESSAGE: u64 = 10;

/// Per-user XP record, stored as `{ "xp": N }`.
///
/// XP only ever grows; nothing in this crate decrements it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpRecord {
    pub xp: u64,
}

impl XpRecord {
    /// Adds `amount` XP, saturating at `u64::MAX`.
    pub fn award(&mut self, amount: u64) {
        self.xp = self.xp.saturating_add(amount);
    }
}

/// A guild's role thresholds: role ID to the level at which it is granted.
///
/// Levels are signed and unbounded; a threshold of zero or below means the
/// role is granted on the first level-up.
pub type LevelRoles = BTreeMap<RoleId, i64>;
