//! Platform-agnostic inbound events.
//!
//! The Discord adapter converts gateway payloads into these types before
//! calling the handlers, so handlers never see serenity types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, GuildId, RoleId, UserId};

/// The kind of channel a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// A guild text or announcement channel. Announcements are only posted here.
    Text,
    /// Threads, voice-channel chat, forum posts, DMs and anything else.
    Other,
}

/// A chat message received from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// The author of the message.
    pub author: UserId,

    /// Whether the author is a bot or webhook account.
    pub author_is_bot: bool,

    /// The guild the message was sent in, or `None` for direct messages.
    pub guild: Option<GuildId>,

    /// The channel the message was sent in.
    pub channel: ChannelId,

    /// What kind of channel `channel` is.
    pub channel_kind: ChannelKind,

    /// Roles the author held when the message was sent.
    pub member_roles: BTreeSet<RoleId>,

    /// The message text.
    pub content: String,
}

impl InboundMessage {
    /// Returns true if level-up and role announcements may be posted in reply.
    pub fn can_announce(&self) -> bool {
        self.channel_kind == ChannelKind::Text
    }
}

/// The user who invoked a command, and the context they invoked it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoker {
    /// The invoking user.
    pub user: UserId,

    /// The guild the command was invoked in, if any.
    pub guild: Option<GuildId>,

    /// Whether the platform reports the Manage Roles permission for this
    /// user in this guild.
    pub can_manage_roles: bool,
}
