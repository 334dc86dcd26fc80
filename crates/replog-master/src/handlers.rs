//! `POST /`, `GET /`, `GET /health` on the master.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use replog_core::CoreError;
use replog_types::{AppendRequest, SecondaryHealthRow, WriteConcern};

use crate::error::AppendError;
use crate::AppState;

/// `POST /`: validate, allocate an id, drive the coordinator, respond.
pub async fn append(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AppendRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<String, AppendError> {
    let Json(req) = body.map_err(|e| AppendError(CoreError::Validation(e.to_string())))?;
    let w = WriteConcern::from_request(req.w);
    let msg = state.coordinator.append(req.msg, w).await?;

    Ok(format!(
        "The message msg_id = {}, msg = \"{}\" has been succesfully replicated\n",
        msg.id, msg.msg
    ))
}

/// `GET /`: id-sorted tabulation of the master log.
pub async fn read(State(state): State<Arc<AppState>>) -> String {
    let entries = state.coordinator.log().snapshot();
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

/// `GET /health`: tabulation of every secondary's believed health state.
pub async fn health(State(state): State<Arc<AppState>>) -> String {
    let rows: Vec<SecondaryHealthRow> = state
        .heartbeat
        .health_rows()
        .into_iter()
        .map(|(name, health_state)| SecondaryHealthRow {
            secondary_name: name,
            health_check_status: health_state.as_str().to_string(),
        })
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["secondary_name", "health_check_status"]);

    for row in &rows {
        table.add_row(vec![row.secondary_name.clone(), row.health_check_status.clone()]);
    }

    format!("Secondaries health status:\n{table}\n")
}
