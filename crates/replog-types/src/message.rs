//! The replicated unit and the ids/write-concerns that govern it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message id, assigned exclusively by the master. Dense, starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl MessageId {
    pub const FIRST: MessageId = MessageId(1);

    pub fn next(self) -> MessageId {
        MessageId(self.0 + 1)
    }

    /// Zero-based slot index into a secondary's (possibly sparse) log.
    pub fn slot_index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Write concern: minimum number of nodes (master inclusive) that must
/// hold the message before the client is told success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteConcern(pub u32);

impl WriteConcern {
    pub const DEFAULT: u32 = 3;

    /// Applies the client-request default: absent *or* zero both fall
    /// back to the default, matching `body_dict.get("w") or 3` in the
    /// original implementation.
    pub fn from_request(w: Option<u32>) -> Self {
        match w {
            Some(0) | None => WriteConcern(Self::DEFAULT),
            Some(w) => WriteConcern(w),
        }
    }

    /// Number of secondary acks required in addition to the master's own.
    pub fn secondary_acks_required(self) -> usize {
        self.0.saturating_sub(1) as usize
    }
}

/// The replicated unit, as held in a `LogEntry` on either role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub msg: String,
    pub w: WriteConcern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicated_ts: Option<DateTime<Utc>>,
}

impl Message {
    /// Renders `replicated_ts` the way both read endpoints present it:
    /// UTC `YYYY-MM-DD HH:MM:SS.ffffff`, or the literal sentinel.
    pub fn replicated_ts_display(&self) -> String {
        match self.replicated_ts {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            None => "NOT REPLICATED".to_string(),
        }
    }
}
