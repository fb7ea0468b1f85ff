//! Bot command types.
//!
//! Commands arrive either as slash-command interactions or as prefixed text
//! messages; both decode into [`Command`].

use serde::{Deserialize, Serialize};

use crate::types::RoleId;

/// A bot command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Shows the invoker's level and XP: `/rank`
    Rank,

    /// Shows the top five XP holders: `/leaderboard`
    Leaderboard,

    /// Sets the level at which a role is granted: `/addrr role level`
    ///
    /// Requires the Manage Roles permission.
    AddRankRole { role: RoleId, level: i64 },
}

impl Command {
    /// The slash-command name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Rank => "rank",
            Command::Leaderboard => "leaderboard",
            Command::AddRankRole { .. } => "addrr",
        }
    }
}
