use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maharlika_bot::config::Config;
use maharlika_bot::handlers::Stores;
use maharlika_bot::{discord, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maharlika_bot=info,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(?config, "Starting");

    let stores =
        Stores::open(&config.xp_path, &config.rank_roles_path).context("opening data files")?;
    let stores = Arc::new(stores);

    let shutdown = CancellationToken::new();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    let server_task = tokio::spawn(server::serve(listener, shutdown.clone()));

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl-C, shutting down"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
        }
        signal_token.cancel();
    });

    let result = discord::run(&config, stores, shutdown.clone()).await;

    shutdown.cancel();
    match server_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Liveness server failed"),
        Err(e) => error!(error = %e, "Liveness server task panicked"),
    }

    result.context("Discord client stopped")?;
    info!("Shut down");
    Ok(())
}
