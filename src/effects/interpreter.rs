//! Effect interpreter trait.
//!
//! The production implementation lives in `crate::discord` and talks to the
//! Discord HTTP API through serenity. Tests use a recording mock.

use std::future::Future;

use super::discord::{DiscordEffect, DiscordResponse};

/// Executes Discord effects.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct AlwaysOk;
///
/// impl DiscordInterpreter for AlwaysOk {
///     type Error = std::convert::Infallible;
///
///     async fn interpret(&self, _effect: DiscordEffect) -> Result<DiscordResponse, Self::Error> {
///         Ok(DiscordResponse::Ok)
///     }
/// }
/// ```
pub trait DiscordInterpreter {
    /// The error type returned by this interpreter.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute a Discord effect and return its response.
    fn interpret(
        &self,
        effect: DiscordEffect,
    ) -> impl Future<Output = Result<DiscordResponse, Self::Error>> + Send;
}
