//! Master binary library: HTTP surface wiring the `replog-core`
//! replication engine to `POST /`, `GET /`, `GET /health`.

mod error;
mod handlers;
mod http;

use std::sync::Arc;

use replog_core::{HeartbeatController, ReplicationCoordinator};

pub use http::{build_router, run};

/// Shared state handed to every `axum` handler.
pub struct AppState {
    pub coordinator: ReplicationCoordinator,
    pub heartbeat: Arc<HeartbeatController>,
}
