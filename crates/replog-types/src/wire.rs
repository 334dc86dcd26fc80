//! HTTP wire-level request/response shapes shared by master and secondary.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Body of `POST /` on the master.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendRequest {
    pub msg: String,
    #[serde(default)]
    pub w: Option<u32>,
}

/// Body of `POST /` on a secondary: a full message record.
pub type SecondaryInsertRequest = Message;

/// One row of the master/secondary health tabulation.
#[derive(Debug, Clone, Serialize)]
pub struct SecondaryHealthRow {
    pub secondary_name: String,
    pub health_check_status: String,
}
