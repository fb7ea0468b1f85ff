//! Effects-as-data for Discord operations.
//!
//! Handlers describe the platform calls they need as [`DiscordEffect`] values
//! and run them through a [`DiscordInterpreter`]. This keeps the XP and role
//! logic independent of the gateway client, and lets tests swap in a mock
//! interpreter that records every call.

pub mod discord;
pub mod interpreter;

pub use discord::{DiscordEffect, DiscordResponse, RoleData, UserData};
pub use interpreter::DiscordInterpreter;
