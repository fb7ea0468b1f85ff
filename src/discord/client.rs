//! Serenity HTTP client wrapper.

use std::sync::Arc;

use serenity::http::Http;

/// A handle on the Discord HTTP API.
///
/// Cheap to clone; all clones share one rate limiter.
#[derive(Clone)]
pub struct SerenityClient {
    http: Arc<Http>,
}

impl SerenityClient {
    /// Wraps an existing serenity HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Returns the underlying serenity HTTP client.
    pub fn http(&self) -> &Http {
        &self.http
    }
}

impl std::fmt::Debug for SerenityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityClient").finish_non_exhaustive()
    }
}
