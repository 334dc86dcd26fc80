//! Builds the `axum::Router` and runs a secondary's HTTP server.

use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use replog_config::HostsFile;
use replog_core::SecondaryLogStore;
use tracing::info;

use crate::{handlers, AppState};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::read).post(handlers::replicate))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Looks up this secondary's own port in `hosts` by `secondary_id` and
/// serves until a shutdown signal arrives.
pub async fn run(hosts: HostsFile, secondary_id: u32) -> anyhow::Result<()> {
    let secondary = hosts
        .secondary_by_id(secondary_id)
        .with_context(|| format!("config.json has no active secondary with id {secondary_id}"))?;

    let state = Arc::new(AppState {
        log: SecondaryLogStore::new(),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", secondary.port))
        .await
        .with_context(|| format!("binding to port {}", secondary.port))?;

    info!(port = secondary.port, "HTTP server started and listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown signal received, stopping secondary");
}
