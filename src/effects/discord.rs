//! Discord effect types.

use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, GuildId, RoleId, UserId};

/// A Discord operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscordEffect {
    // ─── Messages ─────────────────────────────────────────────────────────────
    /// Post a message in a channel.
    SendMessage { channel: ChannelId, content: String },

    // ─── Role membership ──────────────────────────────────────────────────────
    /// Give a role to a guild member.
    AddRole {
        guild: GuildId,
        user: UserId,
        role: RoleId,
    },

    /// Take a role away from a guild member.
    RemoveRole {
        guild: GuildId,
        user: UserId,
        role: RoleId,
    },

    // ─── Lookups ──────────────────────────────────────────────────────────────
    /// List the roles that currently exist in a guild.
    ListGuildRoles { guild: GuildId },

    /// Resolve a user ID to a user.
    FetchUser { user: UserId },
}

/// A role that exists in a guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleData {
    pub id: RoleId,
    pub name: String,
}

/// A resolved user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: UserId,
    /// The user's account name.
    pub name: String,
}

/// Response from a Discord effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DiscordResponse {
    /// Response to `SendMessage`, `AddRole` and `RemoveRole`.
    Ok,

    /// Response to `ListGuildRoles`.
    Roles(Vec<RoleData>),

    /// Response to `FetchUser`.
    User(UserData),
}
