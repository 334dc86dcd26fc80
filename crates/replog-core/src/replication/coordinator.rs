//! Executes one client append end-to-end: quorum admission, id
//! allocation, fan-out to every active secondary, latch wait, finalise.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use replog_types::{Message, WriteConcern};

use crate::error::{CoreError, CoreResult};
use crate::heartbeat::HeartbeatController;
use crate::latch::Latch;
use crate::master_log::LogStore;
use crate::pause_gate::PauseGate;
use crate::replication::client::SecondaryClient;

/// One active secondary as the coordinator needs to see it: a delivery
/// client plus the pause gate the heartbeat controller drives.
pub struct SecondaryTarget {
    pub client: SecondaryClient,
    pub pause: PauseGate,
}

/// Drives quorum admission, id allocation, fan-out and finalisation for
/// every client append.
pub struct ReplicationCoordinator {
    log: Arc<LogStore>,
    heartbeat: Arc<HeartbeatController>,
    secondaries: Vec<SecondaryTarget>,
    cancel: CancellationToken,
}

impl ReplicationCoordinator {
    pub fn new(
        log: Arc<LogStore>,
        heartbeat: Arc<HeartbeatController>,
        secondaries: Vec<SecondaryTarget>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            log,
            heartbeat,
            secondaries,
            cancel,
        }
    }

    /// Number of active secondaries this coordinator fans out to.
    pub fn secondary_count(&self) -> usize {
        self.secondaries.len()
    }

    /// Executes one append. `w` has already had the client-request
    /// default (3) applied by the caller.
    ///
    /// `w` is capped at `1 + secondary_count()`: a write concern the
    /// cluster can never satisfy is rejected as a validation error
    /// rather than left to block the client forever (spec.md §9, Open
    /// Question — resolved in DESIGN.md).
    pub async fn append(&self, payload: String, w: WriteConcern) -> CoreResult<Message> {
        let max_w = 1 + self.secondary_count() as u32;
        if w.0 > max_w {
            return Err(CoreError::Validation(format!(
                "write concern w={} exceeds the maximum obtainable w={} (1 master + {} active secondaries)",
                w.0,
                max_w,
                self.secondary_count()
            )));
        }

        if !self.heartbeat.quorum() {
            return Err(CoreError::NoQuorum);
        }

        let id = self.log.allocate_and_append(payload.clone(), w);
        info!(id = id.0, w = w.0, "append accepted, fanning out to secondaries");

        let required_acks = w.secondary_acks_required();
        let latch = Latch::new(required_acks);

        let msg = Message {
            id,
            msg: payload,
            w,
            replicated_ts: None,
        };

        for target in &self.secondaries {
            let msg = msg.clone();
            let latch = Arc::clone(&latch);
            let pause = target.pause.clone();
            let cancel = self.cancel.clone();
            let client = target.client.clone();
            tokio::spawn(async move {
                client.deliver(msg, pause, latch, cancel).await;
            });
        }

        latch.wait().await;

        let ts = Utc::now();
        self.log.finalize(id, ts);

        let mut finalized = msg;
        finalized.replicated_ts = Some(ts);
        Ok(finalized)
    }

    /// The master's own id allocation, exposed for the read endpoint.
    pub fn log(&self) -> &LogStore {
        &self.log
    }
}
