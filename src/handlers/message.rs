//! XP award and level-up handling for chat messages.
//!
//! # Flow
//!
//! 1. Ignore bots and messages outside a guild
//! 2. Award XP (load, increment, save under the XP store lock)
//! 3. If the level went up: announce it once, then sync the member's level roles
//!
//! The XP save happens before any platform call. A failed announcement or
//! role change is logged and never undoes the award.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use crate::effects::{DiscordEffect, DiscordInterpreter, DiscordResponse};
use crate::events::InboundMessage;
use crate::levels::calculate_level;
use crate::persistence::{StoreError, XpStore};
use crate::replies::{format_level_up, format_role_changes};
use crate::roles::reconcile_roles;
use crate::types::{ChannelId, GuildId, RoleId, UserId, XP_PER_MESSAGE};

use super::{HandlerError, Stores};

/// The XP before and after a single award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpAward {
    pub user: UserId,
    pub old_xp: u64,
    pub new_xp: u64,
}

impl XpAward {
    /// Level before the award.
    pub fn old_level(&self) -> u32 {
        calculate_level(self.old_xp)
    }

    /// Level after the award.
    pub fn new_level(&self) -> u32 {
        calculate_level(self.new_xp)
    }

    /// Returns true if the award crossed at least one level threshold.
    pub fn leveled_up(&self) -> bool {
        self.new_level() > self.old_level()
    }
}

/// What happened while handling a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// The message came from a bot or from outside a guild.
    Ignored,
    /// XP was awarded.
    Awarded(MessageReport),
}

/// Details of an awarded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReport {
    pub award: XpAward,
    /// Whether a level-up announcement was posted.
    pub announced: bool,
    /// Roles successfully granted.
    pub granted: Vec<RoleId>,
    /// Roles successfully revoked.
    pub revoked: Vec<RoleId>,
    /// Roles whose grant or revoke call failed.
    pub failed: Vec<RoleId>,
}

/// Adds [`XP_PER_MESSAGE`] to `user`'s record, creating it at zero if needed.
pub async fn award_xp(store: &XpStore, user: UserId) -> Result<XpAward, StoreError> {
    store
        .update(|records| {
            let record = records.entry(user).or_default();
            let old_xp = record.xp;
            record.award(XP_PER_MESSAGE);
            XpAward {
                user,
                old_xp,
                new_xp: record.xp,
            }
        })
        .await
}

/// Handles one inbound chat message.
///
/// # Errors
///
/// Returns an error only if the XP store can't be read or written. In that
/// case nothing is announced and no roles are changed.
#[instrument(skip_all, fields(user = %message.author, channel = %message.channel))]
pub async fn handle_message<I: DiscordInterpreter>(
    stores: &Stores,
    interpreter: &I,
    message: &InboundMessage,
) -> Result<MessageOutcome, HandlerError> {
    if message.author_is_bot {
        return Ok(MessageOutcome::Ignored);
    }
    let Some(guild) = message.guild else {
        return Ok(MessageOutcome::Ignored);
    };

    let award = award_xp(&stores.xp, message.author).await?;
    let mut report = MessageReport {
        award,
        announced: false,
        granted: Vec::new(),
        revoked: Vec::new(),
        failed: Vec::new(),
    };

    if !award.leveled_up() {
        debug!(xp = award.new_xp, "Awarded XP");
        return Ok(MessageOutcome::Awarded(report));
    }

    let new_level = award.new_level();
    info!(guild = %guild, level = new_level, xp = award.new_xp, "Member leveled up");

    // One announcement per message, even when several levels were crossed.
    if message.can_announce() {
        report.announced = send(
            interpreter,
            message.channel,
            format_level_up(message.author, new_level),
        )
        .await;
    }

    let level_roles = stores.rank_roles.get(&guild).await?;
    let Some(level_roles) = level_roles.filter(|roles| !roles.is_empty()) else {
        return Ok(MessageOutcome::Awarded(report));
    };

    let Some(role_names) = guild_roles(interpreter, guild).await else {
        return Ok(MessageOutcome::Awarded(report));
    };

    let diff = reconcile_roles(new_level, &level_roles, &message.member_roles, |role| {
        role_names.contains_key(&role)
    });
    if diff.is_empty() {
        return Ok(MessageOutcome::Awarded(report));
    }

    for role in diff.to_grant {
        let effect = DiscordEffect::AddRole {
            guild,
            user: message.author,
            role,
        };
        if apply_role_change(interpreter, effect).await {
            report.granted.push(role);
        } else {
            report.failed.push(role);
        }
    }
    for role in diff.to_revoke {
        let effect = DiscordEffect::RemoveRole {
            guild,
            user: message.author,
            role,
        };
        if apply_role_change(interpreter, effect).await {
            report.revoked.push(role);
        } else {
            report.failed.push(role);
        }
    }

    let granted_names = names_of(&report.granted, &role_names);
    let revoked_names = names_of(&report.revoked, &role_names);
    if let Some(log) = format_role_changes(&granted_names, &revoked_names) {
        info!(granted = ?granted_names, revoked = ?revoked_names, "Updated level roles");
        if message.can_announce() {
            send(interpreter, message.channel, log).await;
        }
    }

    Ok(MessageOutcome::Awarded(report))
}

/// Fetches the guild's roles as an ID-to-name map.
///
/// Returns `None` (and logs) if the lookup fails, in which case role sync is
/// skipped for this message.
async fn guild_roles<I: DiscordInterpreter>(
    interpreter: &I,
    guild: GuildId,
) -> Option<BTreeMap<RoleId, String>> {
    match interpreter
        .interpret(DiscordEffect::ListGuildRoles { guild })
        .await
    {
        Ok(DiscordResponse::Roles(roles)) => {
            Some(roles.into_iter().map(|role| (role.id, role.name)).collect())
        }
        Ok(other) => {
            warn!(guild = %guild, response = ?other, "Unexpected response to role lookup");
            None
        }
        Err(e) => {
            warn!(guild = %guild, error = %e, "Failed to list guild roles, skipping role sync");
            None
        }
    }
}

/// Runs a grant or revoke. Returns true on success.
async fn apply_role_change<I: DiscordInterpreter>(interpreter: &I, effect: DiscordEffect) -> bool {
    match interpreter.interpret(effect.clone()).await {
        Ok(_) => true,
        Err(e) => {
            warn!(?effect, error = %e, "Role change failed");
            false
        }
    }
}

/// Posts a message. Returns true on success.
async fn send<I: DiscordInterpreter>(interpreter: &I, channel: ChannelId, content: String) -> bool {
    match interpreter
        .interpret(DiscordEffect::SendMessage { channel, content })
        .await
    {
        Ok(_) => true,
        Err(e) => {
            warn!(channel = %channel, error = %e, "Failed to send message");
            false
        }
    }
}

fn names_of(roles: &[RoleId], names: &BTreeMap<RoleId, String>) -> Vec<String> {
    roles
        .iter()
        .map(|role| names.get(role).cloned().unwrap_or_else(|| role.to_string()))
        .collect()
}
