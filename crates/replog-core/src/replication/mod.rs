//! Per-append fan-out, quorum latch, and the retrying per-secondary
//! delivery client.

pub mod client;
pub mod coordinator;

pub use client::SecondaryClient;
pub use coordinator::{ReplicationCoordinator, SecondaryTarget};
