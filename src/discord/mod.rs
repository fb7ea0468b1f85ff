//! Discord gateway adapter and effect interpreter.
//!
//! This module is the only place that touches serenity. It:
//! - Converts gateway events into [`crate::events`] types and calls the handlers
//! - Implements [`crate::effects::DiscordInterpreter`] over the Discord HTTP API
//! - Registers and decodes the slash commands

mod client;
mod commands;
mod convert;
mod error;
mod gateway;
mod interpreter;

pub use client::SerenityClient;
pub use commands::{decode_command, slash_commands};
pub use error::{DiscordApiError, DiscordErrorKind};
pub use gateway::{Handler, gateway_intents, run};
