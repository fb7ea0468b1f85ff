//! Core domain types for the XP and level-role bot.

pub mod ids;
pub mod records;

pub use ids::{ChannelId, GuildId, RoleId, UserId};
pub use records::{LevelRoles, XP_PER_MESSAGE, XpRecord};
