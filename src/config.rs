//! Startup configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DISCORD_BOT_TOKEN` | required |
//! | `XP_FILE` | `xp_data.json` |
//! | `RANK_FILE` | `rank_roles.json` |
//! | `PORT` | `8080` |
//! | `COMMAND_PREFIX` | `!` |

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
pub const XP_FILE_VAR: &str = "XP_FILE";
pub const RANK_FILE_VAR: &str = "RANK_FILE";
pub const PORT_VAR: &str = "PORT";
pub const PREFIX_VAR: &str = "COMMAND_PREFIX";

const DEFAULT_XP_FILE: &str = "xp_data.json";
const DEFAULT_RANK_FILE: &str = "rank_roles.json";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PREFIX: &str = "!";

/// Errors that prevent the bot from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The gateway token is unset or blank.
    #[error("{TOKEN_VAR} is not set in environment variables")]
    MissingToken,

    /// `PORT` is not a valid port number.
    #[error("{PORT_VAR} must be a port number, got {0:?}")]
    InvalidPort(String),
}

/// Bot configuration.
#[derive(Clone)]
pub struct Config {
    /// Discord bot token.
    pub token: String,
    /// Path of the XP store.
    pub xp_path: PathBuf,
    /// Path of the rank-role store.
    pub rank_roles_path: PathBuf,
    /// Port the liveness server listens on.
    pub port: u16,
    /// Prefix for text commands.
    pub command_prefix: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            token,
            xp_path: lookup(XP_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_XP_FILE)),
            rank_roles_path: lookup(RANK_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RANK_FILE)),
            port,
            command_prefix: lookup(PREFIX_VAR)
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("xp_path", &self.xp_path)
            .field("rank_roles_path", &self.rank_roles_path)
            .field("port", &self.port)
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}
