//! Reply and announcement formatting.

use serde::Serialize;

use crate::levels::LevelProgress;
use crate::types::{RoleId, UserId};

/// Number of entries shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub position: usize,
    /// Resolved display name (falls back to the raw user ID).
    pub display_name: String,
    /// Total XP.
    pub xp: u64,
}

/// Announcement posted when a member reaches a new level.
pub fn format_level_up(user: UserId, level: u32) -> String {
    format!("🎉 {} reached level {}!", user.mention(), level)
}

/// Consolidated log of the roles granted and revoked after a level-up.
///
/// Returns `None` when both lists are empty. A section whose list is empty is
/// left out.
pub fn format_role_changes(granted: &[String], revoked: &[String]) -> Option<String> {
    let mut lines = Vec::new();
    if !granted.is_empty() {
        lines.push(format!("🆕 Given roles: {}", granted.join(", ")));
    }
    if !revoked.is_empty() {
        lines.push(format!("❌ Removed roles: {}", revoked.join(", ")));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Reply to the `rank` command.
pub fn format_rank(progress: &LevelProgress) -> String {
    format!(
        "🧪 You are level {} with {} XP.",
        progress.level, progress.xp
    )
}

/// Reply to the `leaderboard` command.
pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let mut msg = format!("🏆 **Top {} XP Leaders**:\n", LEADERBOARD_SIZE);
    if entries.is_empty() {
        msg.push_str("No XP has been earned yet.\n");
    }
    for entry in entries {
        msg.push_str(&format!(
            "{}. {} - {} XP\n",
            entry.position, entry.display_name, entry.xp
        ));
    }
    msg
}

/// Reply to a successful `addrr` command.
pub fn format_add_rank_role(role: RoleId, level: i64) -> String {
    format!(
        "✅ {} will now be awarded at level {}.",
        role.mention(),
        level
    )
}
