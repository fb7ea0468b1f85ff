//! Handlers for chat messages and bot commands.
//!
//! Handlers read and write the stores directly and reach the platform only
//! through a [`DiscordInterpreter`], so they can be driven by the gateway
//! adapter in production and by a mock interpreter in tests.
//!
//! | Input | Handler |
//! |-------|---------|
//! | chat message | [`handle_message`] - XP award, level-up, role sync |
//! | `rank` | [`rank`] |
//! | `leaderboard` | [`leaderboard`] |
//! | `addrr` | [`add_rank_role`] |

mod configure;
mod leaderboard;
mod message;
mod rank;

use std::path::Path;

use thiserror::Error;

use crate::commands::Command;
use crate::effects::DiscordInterpreter;
use crate::events::Invoker;
use crate::persistence::{RankRoleStore, StoreError, XpStore};
use crate::replies::{format_add_rank_role, format_leaderboard, format_rank};

pub use configure::add_rank_role;
pub use leaderboard::{leaderboard, top_entries};
pub use message::{MessageOutcome, MessageReport, XpAward, award_xp, handle_message};
pub use rank::rank;

/// The two stores the bot reads and writes.
#[derive(Debug)]
pub struct Stores {
    /// Per-user XP.
    pub xp: XpStore,
    /// Per-guild role thresholds.
    pub rank_roles: RankRoleStore,
}

impl Stores {
    /// Opens both stores, creating empty files where missing.
    pub fn open(xp_path: &Path, rank_roles_path: &Path) -> Result<Self, StoreError> {
        Ok(Stores {
            xp: XpStore::open(xp_path)?,
            rank_roles: RankRoleStore::open(rank_roles_path)?,
        })
    }
}

/// Errors that abort handling of a chat message.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A store could not be read or written.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors reported back to the user who invoked a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command needs a guild but was invoked elsewhere.
    #[error("command must be used in a server")]
    MissingGuild,

    /// The invoker lacks the Manage Roles permission.
    #[error("invoker lacks the Manage Roles permission")]
    MissingPermission,

    /// A store could not be read or written.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CommandError {
    /// Short message shown to the invoker.
    pub fn reply(&self) -> &'static str {
        match self {
            CommandError::MissingGuild => "❌ This must be used in a server.",
            CommandError::MissingPermission => "❌ You need Manage Roles permission.",
            CommandError::Store(_) => "❌ Something went wrong. Please try again later.",
        }
    }
}

/// Runs a command and returns the reply text.
pub async fn dispatch_command<I: DiscordInterpreter>(
    stores: &Stores,
    interpreter: &I,
    invoker: &Invoker,
    command: Command,
) -> Result<String, CommandError> {
    match command {
        Command::Rank => {
            let progress = rank(&stores.xp, invoker.user).await?;
            Ok(format_rank(&progress))
        }
        Command::Leaderboard => {
            let entries = leaderboard(&stores.xp, interpreter).await?;
            Ok(format_leaderboard(&entries))
        }
        Command::AddRankRole { role, level } => {
            add_rank_role(&stores.rank_roles, invoker, role, level).await?;
            Ok(format_add_rank_role(role, level))
        }
    }
}
