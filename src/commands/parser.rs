//! Parser for prefixed text commands.
//!
//! This is a pure parser that extracts a [`Command`] from message text such as
//! `!rank` or `!addrr <@&123> 5`.

use crate::types::RoleId;

use super::types::Command;

/// Parses a text command.
///
/// # Arguments
///
/// * `text` - The message text
/// * `prefix` - The command prefix (e.g., `"!"`)
///
/// # Parsing Rules
///
/// - The message must start with the prefix, after optional leading whitespace
/// - Command names (`rank`, `leaderboard`, `addrr`) are case-insensitive
/// - `addrr` takes a role (a `<@&ID>` mention or a bare ID) and a signed level
/// - Returns `None` for anything else, including malformed arguments
///
/// # Examples
///
/// ```
/// use maharlika_bot::commands::{parse_command, Command};
/// use maharlika_bot::types::RoleId;
///
/// assert_eq!(parse_command("!rank", "!"), Some(Command::Rank));
/// assert_eq!(parse_command("!LeaderBoard", "!"), Some(Command::Leaderboard));
/// assert_eq!(
///     parse_command("!addrr <@&42> 5", "!"),
///     Some(Command::AddRankRole { role: RoleId(42), level: 5 })
/// );
/// assert_eq!(parse_command("rank", "!"), None);
/// assert_eq!(parse_command("!ranking", "!"), None);
/// ```
pub fn parse_command(text: &str, prefix: &str) -> Option<Command> {
    if prefix.is_empty() {
        return None;
    }

    let text = text.trim_start().strip_prefix(prefix)?;
    let (cmd_word, rest) = split_first_word(text);

    match cmd_word.to_ascii_lowercase().as_str() {
        "rank" => Some(Command::Rank),
        "leaderboard" => Some(Command::Leaderboard),
        "addrr" => parse_add_rank_role(rest),
        _ => None,
    }
}

/// Parses the `addrr` arguments: `<role> <level>`
fn parse_add_rank_role(text: &str) -> Option<Command> {
    let (role_str, rest) = split_first_word(text.trim_start());
    let role = parse_role(role_str)?;

    let (level_str, _) = split_first_word(rest.trim_start());
    let level: i64 = level_str.parse().ok()?;

    Some(Command::AddRankRole { role, level })
}

/// Parses a role mention (`<@&ID>`) or a bare role ID.
fn parse_role(text: &str) -> Option<RoleId> {
    let id = text
        .strip_prefix("<@&")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(text);

    // Snowflakes are never zero
    match id.parse::<u64>().ok()? {
        0 => None,
        n => Some(RoleId(n)),
    }
}

/// Splits text at the first whitespace, returning (word, rest).
/// If no whitespace, returns (text, "").
fn split_first_word(text: &str) -> (&str, &str) {
    match text.find(|c: char| c.is_whitespace()) {
        Some(pos) => (&text[..pos], &text[pos..]),
        None => (text, ""),
    }
}
