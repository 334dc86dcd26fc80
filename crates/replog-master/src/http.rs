//! Builds the `axum::Router` and runs the master's HTTP server
//! alongside the heartbeat background task.

use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use replog_config::HostsFile;
use replog_core::replication::SecondaryTarget;
use replog_core::{HeartbeatController, LogStore, ReplicationCoordinator, SecondaryClient};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{handlers, AppState};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::read).post(handlers::append))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Wires `hosts` into a [`ReplicationCoordinator`], starts the
/// heartbeat controller, and serves the master HTTP API until a
/// shutdown signal arrives.
pub async fn run(hosts: HostsFile) -> anyhow::Result<()> {
    let master = hosts
        .master()
        .context("config.json Hosts[] has no entry with type \"master\"")?;
    let secondaries = hosts.active_secondaries();

    let heartbeat_inputs: Vec<(u32, String, String)> = secondaries
        .iter()
        .map(|s| (s.id, s.name.clone(), s.base_url()))
        .collect();
    let (heartbeat, gates) = HeartbeatController::new(heartbeat_inputs);
    let heartbeat = Arc::new(heartbeat);

    let cancel = CancellationToken::new();
    let targets: Vec<SecondaryTarget> = secondaries
        .iter()
        .map(|s| SecondaryTarget {
            client: SecondaryClient::new(s.base_url(), s.name.clone()),
            pause: gates
                .get(&s.id)
                .expect("a gate exists for every active secondary")
                .clone(),
        })
        .collect();

    let log = Arc::new(LogStore::new());
    let coordinator = ReplicationCoordinator::new(log, Arc::clone(&heartbeat), targets, cancel.clone());

    let state = Arc::new(AppState {
        coordinator,
        heartbeat: Arc::clone(&heartbeat),
    });

    let heartbeat_task = tokio::spawn({
        let heartbeat = Arc::clone(&heartbeat);
        let cancel = cancel.clone();
        async move { heartbeat.run(cancel).await }
    });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", master.port))
        .await
        .with_context(|| format!("binding to port {}", master.port))?;

    info!(port = master.port, "HTTP server started and listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    cancel.cancel();
    let _ = heartbeat_task.await;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown signal received, stopping master");
}
