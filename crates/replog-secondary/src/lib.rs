//! Secondary binary library: HTTP surface wiring
//! [`replog_core::SecondaryLogStore`] to `POST /`, `GET /`, `GET /health`.

mod handlers;
mod http;

use replog_core::SecondaryLogStore;

pub use http::{build_router, run};

/// Shared state handed to every `axum` handler.
pub struct AppState {
    pub log: SecondaryLogStore,
}
