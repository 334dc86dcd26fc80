//! `POST /`, `GET /`, `GET /health` on a secondary.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use replog_core::InsertOutcome;
use replog_types::SecondaryInsertRequest;
use tracing::info;

use crate::AppState;

/// Test hook from spec.md §4.6: a literal `"wait"` payload delays
/// insertion 10s, applied before the store's lock is ever touched —
/// matching `original_source/secondary.py`'s `time.sleep(10)` placement,
/// so it never blocks inserts of other ids.
const ORDERING_TEST_PAYLOAD: &str = "wait";
const ORDERING_TEST_DELAY: Duration = Duration::from_secs(10);

/// `POST /`: a full message record. Response is `200` on successful
/// insert or idempotent duplicate.
pub async fn replicate(
    State(state): State<Arc<AppState>>,
    Json(msg): Json<SecondaryInsertRequest>,
) -> (StatusCode, String) {
    if msg.msg == ORDERING_TEST_PAYLOAD {
        tokio::time::sleep(ORDERING_TEST_DELAY).await;
    }

    let id = msg.id;
    match state.log.insert(msg) {
        InsertOutcome::Inserted => {
            info!(id = id.0, "message replicated");
            (
                StatusCode::OK,
                format!("Message with id = {id} has been replicated\n"),
            )
        }
        InsertOutcome::AlreadyPresent => (
            StatusCode::OK,
            format!("Message with id = {id} already exists in the log\n"),
        ),
    }
}

/// `GET /`: the gap-free prefix of the local log.
pub async fn read(State(state): State<Arc<AppState>>) -> String {
    let entries = state.log.readable_prefix();
    if entries.is_empty() {
        return "The replication log is empty\n".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["id", "msg", "w", "replicated_ts"]);

    for entry in &entries {
        table.add_row(vec![
            entry.id.to_string(),
            entry.msg.clone(),
            entry.w.0.to_string(),
            entry.replicated_ts_display(),
        ]);
    }

    format!("The replication log:\n{table}\n")
}

/// `GET /health`: `200` whenever the process is serving.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
