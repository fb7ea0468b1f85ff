//! The `addrr` command: configure the level at which a role is granted.

use tracing::info;

use crate::events::Invoker;
use crate::persistence::RankRoleStore;
use crate::types::RoleId;

use super::CommandError;

/// Sets `role` to be granted at `level` in the invoker's guild.
///
/// Any previous threshold for the role is overwritten. Levels are not range
/// checked; zero or negative means the role is granted on the next level-up.
///
/// # Errors
///
/// - [`CommandError::MissingGuild`] outside a guild
/// - [`CommandError::MissingPermission`] without Manage Roles
///
/// Nothing is written in either case.
pub async fn add_rank_role(
    store: &RankRoleStore,
    invoker: &Invoker,
    role: RoleId,
    level: i64,
) -> Result<(), CommandError> {
    let Some(guild) = invoker.guild else {
        return Err(CommandError::MissingGuild);
    };
    if !invoker.can_manage_roles {
        return Err(CommandError::MissingPermission);
    }

    store
        .update(|guilds| {
            guilds.entry(guild).or_default().insert(role, level);
        })
        .await?;

    info!(guild = %guild, role = %role, level, user = %invoker.user, "Configured rank role");
    Ok(())
}
