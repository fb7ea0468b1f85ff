//! Discord API error types.
//!
//! Failures are categorized so the logs say why a role change or message was
//! refused. Nothing is retried; a failed call is reported and skipped.

use std::fmt;

use thiserror::Error;

/// The kind of Discord API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscordErrorKind {
    /// HTTP 403: the bot lacks a permission, or the target role sits above
    /// the bot's highest role.
    MissingPermissions,

    /// HTTP 404: the guild, member, role, user or channel no longer exists.
    NotFound,

    /// Anything else (network errors, 5xx, rate limits, invalid IDs).
    Other,
}

/// A Discord API error.
#[derive(Debug, Error)]
pub struct DiscordApiError {
    /// The kind of error.
    pub kind: DiscordErrorKind,

    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying serenity error, if available.
    #[source]
    pub source: Option<serenity::Error>,
}

impl fmt::Display for DiscordApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "Discord API error (HTTP {}): {}", code, self.message),
            None => write!(f, "Discord API error: {}", self.message),
        }
    }
}

impl DiscordApiError {
    /// Categorizes a serenity error.
    pub fn from_serenity(err: serenity::Error) -> Self {
        let status_code = match &err {
            serenity::Error::Http(http_err) => http_err.status_code().map(|s| s.as_u16()),
            _ => None,
        };

        Self {
            kind: kind_for_status(status_code),
            status_code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Creates an error for an ID that can't be sent to Discord.
    pub fn invalid_id(what: &str) -> Self {
        Self {
            kind: DiscordErrorKind::Other,
            status_code: None,
            message: format!("invalid {} ID 0", what),
            source: None,
        }
    }
}

fn kind_for_status(status_code: Option<u16>) -> DiscordErrorKind {
    match status_code {
        Some(403) => DiscordErrorKind::MissingPermissions,
        Some(404) => DiscordErrorKind::NotFound,
        _ => DiscordErrorKind::Other,
    }
}
