//! Discord effect interpreter using serenity's HTTP client.

use serenity::model::id as sid;

use crate::effects::{DiscordEffect, DiscordInterpreter, DiscordResponse, RoleData, UserData};
use crate::types::{ChannelId, GuildId, RoleId, UserId};

use super::client::SerenityClient;
use super::convert::{
    role_id, to_serenity_channel, to_serenity_guild, to_serenity_role, to_serenity_user, user_id,
};
use super::error::DiscordApiError;

/// Audit log reason attached to automatic role changes.
const AUDIT_REASON: &str = "Level role sync";

impl DiscordInterpreter for SerenityClient {
    type Error = DiscordApiError;

    async fn interpret(&self, effect: DiscordEffect) -> Result<DiscordResponse, Self::Error> {
        match effect {
            DiscordEffect::SendMessage { channel, content } => {
                send_message(self, channel, content).await
            }
            DiscordEffect::AddRole { guild, user, role } => {
                add_role(self, guild, user, role).await
            }
            DiscordEffect::RemoveRole { guild, user, role } => {
                remove_role(self, guild, user, role).await
            }
            DiscordEffect::ListGuildRoles { guild } => list_guild_roles(self, guild).await,
            DiscordEffect::FetchUser { user } => fetch_user(self, user).await,
        }
    }
}

async fn send_message(
    client: &SerenityClient,
    channel: ChannelId,
    content: String,
) -> Result<DiscordResponse, DiscordApiError> {
    let channel =
        to_serenity_channel(channel).ok_or_else(|| DiscordApiError::invalid_id("channel"))?;
    channel
        .say(client.http(), content)
        .await
        .map_err(DiscordApiError::from_serenity)?;
    Ok(DiscordResponse::Ok)
}

async fn add_role(
    client: &SerenityClient,
    guild: GuildId,
    user: UserId,
    role: RoleId,
) -> Result<DiscordResponse, DiscordApiError> {
    let (guild, user, role) = member_role_ids(guild, user, role)?;
    client
        .http()
        .add_member_role(guild, user, role, Some(AUDIT_REASON))
        .await
        .map_err(DiscordApiError::from_serenity)?;
    Ok(DiscordResponse::Ok)
}

async fn remove_role(
    client: &SerenityClient,
    guild: GuildId,
    user: UserId,
    role: RoleId,
) -> Result<DiscordResponse, DiscordApiError> {
    let (guild, user, role) = member_role_ids(guild, user, role)?;
    client
        .http()
        .remove_member_role(guild, user, role, Some(AUDIT_REASON))
        .await
        .map_err(DiscordApiError::from_serenity)?;
    Ok(DiscordResponse::Ok)
}

async fn list_guild_roles(
    client: &SerenityClient,
    guild: GuildId,
) -> Result<DiscordResponse, DiscordApiError> {
    let guild = to_serenity_guild(guild).ok_or_else(|| DiscordApiError::invalid_id("guild"))?;
    let roles = client
        .http()
        .get_guild_roles(guild)
        .await
        .map_err(DiscordApiError::from_serenity)?;

    Ok(DiscordResponse::Roles(
        roles
            .into_iter()
            .map(|role| RoleData {
                id: role_id(role.id),
                name: role.name,
            })
            .collect(),
    ))
}

async fn fetch_user(
    client: &SerenityClient,
    user: UserId,
) -> Result<DiscordResponse, DiscordApiError> {
    let user = to_serenity_user(user).ok_or_else(|| DiscordApiError::invalid_id("user"))?;
    let fetched = client
        .http()
        .get_user(user)
        .await
        .map_err(DiscordApiError::from_serenity)?;

    Ok(DiscordResponse::User(UserData {
        id: user_id(fetched.id),
        name: fetched.name,
    }))
}

fn member_role_ids(
    guild: GuildId,
    user: UserId,
    role: RoleId,
) -> Result<(sid::GuildId, sid::UserId, sid::RoleId), DiscordApiError> {
    let guild = to_serenity_guild(guild).ok_or_else(|| DiscordApiError::invalid_id("guild"))?;
    let user = to_serenity_user(user).ok_or_else(|| DiscordApiError::invalid_id("user"))?;
    let role = to_serenity_role(role).ok_or_else(|| DiscordApiError::invalid_id("role"))?;
    Ok((guild, user, role))
}
