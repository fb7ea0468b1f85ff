//! HTTP liveness server.
//!
//! Runs alongside the gateway connection so the process answers HTTP
//! probes while the bot is up.
//!
//! # Endpoints
//!
//! - `GET /` - Returns the alive banner
//! - `GET /health` - Returns 200 if server is running

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub mod health;

pub use health::{ALIVE_BANNER, alive_handler, health_handler};

/// Builds the axum Router with all endpoints.
pub fn build_router() -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route("/", get(alive_handler))
        .route("/health", get(health_handler))
}

/// Serves the router on `listener` until `shutdown` is cancelled.
pub async fn serve(listener: TcpListener, shutdown: CancellationToken) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Liveness server listening");
    }

    axum::serve(listener, build_router())
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = build_router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn root_returns_banner() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ALIVE_BANNER.as_bytes());
    }

    #[tokio::test]
    async fn health_returns_200() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn unknown_path_returns_404() {
        let (status, _) = get("/webhook").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_to_root_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = build_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn serve_stops_on_cancel() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(serve(listener, shutdown.clone()));

        shutdown.cancel();

        handle.await.unwrap().unwrap();
    }
}
