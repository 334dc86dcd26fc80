//! Delivers one message to one secondary, forever, until accepted.
//!
//! One instance per (message, secondary) replication attempt, matching
//! `original_source/master.py::replicate_msg`'s per-thread loop. Backoff
//! is the randomized schedule the spec permits (§4.2): zero on the first
//! attempt, `+= uniform[1,10]` after each failure, reset to a fresh
//! `uniform[1,10]` once the delay would exceed 60s.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use replog_types::Message;

use crate::latch::Latch;
use crate::pause_gate::PauseGate;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(3_500);
const BACKOFF_RESET_THRESHOLD: u64 = 60;

fn next_backoff(current: u64) -> u64 {
    let bump = rand::thread_rng().gen_range(1..=10u64);
    if current > BACKOFF_RESET_THRESHOLD {
        bump
    } else {
        current + bump
    }
}

/// Delivers `msg` to `base_url` until it is accepted or `cancel` fires.
///
/// On success, calls `latch.count_down()` exactly once. Never returns an
/// error to the caller: connection failures and non-200 responses are
/// retried forever (`TransientDeliveryError` is swallowed here, per
/// spec.md §7).
#[derive(Clone)]
pub struct SecondaryClient {
    client: Client,
    base_url: String,
    secondary_name: String,
}

impl SecondaryClient {
    pub fn new(base_url: impl Into<String>, secondary_name: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("building the replication reqwest client");
        Self {
            client,
            base_url: base_url.into(),
            secondary_name: secondary_name.into(),
        }
    }

    pub async fn deliver(
        &self,
        msg: Message,
        mut pause: PauseGate,
        latch: Arc<Latch>,
        cancel: CancellationToken,
    ) {
        let mut delay = 0u64;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = pause.wait_open() => {}
            }

            if delay > 0 {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(Duration::from_secs(delay)) => {}
                }
            }

            match self.client.post(&self.base_url).json(&msg).send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!(secondary = %self.secondary_name, id = msg.id.0, "message replicated");
                    latch.count_down();
                    return;
                }
                Ok(resp) => {
                    warn!(secondary = %self.secondary_name, id = msg.id.0, status = %resp.status(), "secondary rejected replication attempt, retrying");
                }
                Err(err) => {
                    warn!(secondary = %self.secondary_name, id = msg.id.0, error = %err, delay_s = delay, "secondary unreachable, retrying");
                }
            }

            delay = next_backoff(delay);
        }
    }
}
