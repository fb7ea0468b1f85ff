//! Liveness endpoints.
//!
//! Hosting platforms that expect a web process ping these to keep the bot
//! awake and to check it is still running.

use axum::http::StatusCode;

/// Banner served at `/`.
pub const ALIVE_BANNER: &str = "✅ Maharlika Bot is alive!";

/// Root handler. Returns 200 OK with [`ALIVE_BANNER`].
pub async fn alive_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, ALIVE_BANNER)
}

/// Health check handler.
///
/// # Example
///
/// ```ignore
/// GET /health HTTP/1.1
///
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
///
/// OK
/// ```
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
