//! Bot commands.
//!
//! # Supported Commands
//!
//! - `rank` - Shows the invoker's level and XP
//! - `leaderboard` - Shows the five users with the most XP
//! - `addrr <role> <level>` - Grants `role` automatically from `level` on
//!   (requires Manage Roles)
//!
//! Each is registered as a slash command and also accepted as a prefixed text
//! message (`!rank`, ...).
//!
//! # Example
//!
//! ```
//! use maharlika_bot::commands::{parse_command, Command};
//!
//! assert_eq!(parse_command("!rank", "!"), Some(Command::Rank));
//! ```

mod parser;
mod types;

pub use parser::parse_command;
pub use types::Command;
