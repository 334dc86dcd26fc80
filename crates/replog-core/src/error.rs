//! Structural errors the coordinator surfaces to its caller.
//!
//! `TransientDeliveryError` deliberately has no variant here: delivery
//! failures never leave [`crate::replication::client`] — only acks do.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors the replication engine can surface across its API boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The inbound append request failed schema validation.
    #[error("invalid append request: {0}")]
    Validation(String),

    /// No secondary is currently believed reachable; the master is
    /// read-only. Carries the same explanatory text the client sees.
    #[error("no secondaries quorum: master is read-only")]
    NoQuorum,

    /// Anything unexpected inside the coordinator.
    #[error("internal replication error: {0}")]
    Internal(String),
}
