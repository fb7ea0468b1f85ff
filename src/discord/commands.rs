//! Slash command registration and decoding.

use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{CommandInteraction, CommandOptionType, ResolvedValue};

use crate::commands::Command;
use crate::events::Invoker;
use crate::types::RoleId;

use super::convert::{guild_id, role_id, user_id};

/// Definitions of the slash commands, registered globally on ready.
pub fn slash_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("rank").description("Show your current level and XP"),
        CreateCommand::new("leaderboard").description("Show the top 5 XP holders"),
        CreateCommand::new("addrr")
            .description("Set a role to be given at a specific level")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "Role to assign")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "level",
                    "Level to assign it at",
                )
                .required(true),
            ),
    ]
}

/// Decodes a slash command from its name and resolved options.
///
/// Returns `None` for unknown commands or missing `addrr` options.
pub fn decode_command(name: &str, role: Option<RoleId>, level: Option<i64>) -> Option<Command> {
    match name {
        "rank" => Some(Command::Rank),
        "leaderboard" => Some(Command::Leaderboard),
        "addrr" => Some(Command::AddRankRole {
            role: role?,
            level: level?,
        }),
        _ => None,
    }
}

/// Decodes an interaction into a command and its invoker.
pub(super) fn decode_interaction(interaction: &CommandInteraction) -> Option<(Command, Invoker)> {
    let mut role = None;
    let mut level = None;
    for option in interaction.data.options() {
        match (option.name, option.value) {
            ("role", ResolvedValue::Role(r)) => role = Some(role_id(r.id)),
            ("level", ResolvedValue::Integer(n)) => level = Some(n),
            _ => {}
        }
    }

    let command = decode_command(&interaction.data.name, role, level)?;

    // Interaction payloads carry the member's resolved permissions for the
    // channel the command was used in.
    let can_manage_roles = interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.manage_roles());

    let invoker = Invoker {
        user: user_id(interaction.user.id),
        guild: interaction.guild_id.map(guild_id),
        can_manage_roles,
    };

    Some((command, invoker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_commands() {
        assert_eq!(decode_command("rank", None, None), Some(Command::Rank));
        assert_eq!(
            decode_command("leaderboard", None, None),
            Some(Command::Leaderboard)
        );
    }

    #[test]
    fn decodes_addrr_with_options() {
        assert_eq!(
            decode_command("addrr", Some(RoleId(3)), Some(-2)),
            Some(Command::AddRankRole {
                role: RoleId(3),
                level: -2
            })
        );
    }

    #[test]
    fn addrr_without_options_is_rejected() {
        assert_eq!(decode_command("addrr", None, Some(1)), None);
        assert_eq!(decode_command("addrr", Some(RoleId(3)), None), None);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(decode_command("ping", None, None), None);
    }

    #[test]
    fn every_command_is_registered() {
        assert_eq!(slash_commands().len(), 3);
    }
}
