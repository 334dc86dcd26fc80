//! The replication engine: log stores, the quorum-acknowledgement
//! coordinator, the retrying secondary client, and the heartbeat
//! controller. No HTTP framing lives here — `replog-master` and
//! `replog-secondary` wire this engine to `axum`.

pub mod error;
pub mod heartbeat;
pub mod latch;
pub mod master_log;
pub mod pause_gate;
pub mod replication;
pub mod secondary_log;

pub use error::{CoreError, CoreResult};
pub use heartbeat::{HealthState, HeartbeatController};
pub use latch::Latch;
pub use master_log::LogStore;
pub use pause_gate::{pause_gate, PauseGate, PauseGateHandle};
pub use replication::{ReplicationCoordinator, SecondaryClient};
pub use secondary_log::{InsertOutcome, SecondaryLogStore};
