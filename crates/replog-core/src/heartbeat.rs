//! Per-secondary health FSM and the derived quorum flag.
//!
//! State table and edge-logging rules match `spec.md` §4.4 /
//! `original_source/master.py::health_check`+`heartbeats` exactly: a
//! single probe failure only ever demotes one step (`Healthy` ->
//! `Suspected`, not straight to `Unhealthy`); any success jumps back to
//! `Healthy` directly from any prior state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::pause_gate::{pause_gate, PauseGate, PauseGateHandle};

pub const PROBE_INTERVAL: Duration = Duration::from_secs(5);
pub const PROBE_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
pub const PROBE_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Health state of one secondary, as believed by the master.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Unknown,
    Healthy,
    Suspected,
    Unhealthy,
}

impl HealthState {
    fn next(self, probe_succeeded: bool) -> HealthState {
        use HealthState::*;
        match (self, probe_succeeded) {
            (_, true) => Healthy,
            (Unknown, false) => Suspected,
            (Healthy, false) => Suspected,
            (Suspected, false) => Unhealthy,
            (Unhealthy, false) => Unhealthy,
        }
    }

    pub fn counts_toward_quorum(self) -> bool {
        matches!(self, HealthState::Unknown | HealthState::Healthy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Unknown => "Unknown",
            HealthState::Healthy => "Healthy",
            HealthState::Suspected => "Suspected",
            HealthState::Unhealthy => "Unhealthy",
        }
    }
}

struct SecondaryHealth {
    name: String,
    base_url: String,
    state: RwLock<HealthState>,
    gate_handle: PauseGateHandle,
}

/// Tracks health for every active secondary and the derived quorum flag.
pub struct HeartbeatController {
    secondaries: HashMap<u32, SecondaryHealth>,
    order: Vec<u32>,
    quorum: AtomicBool,
    client: Client,
}

impl HeartbeatController {
    /// `secondaries`: `(id, name, base_url)` for every active secondary,
    /// in config order. The quorum flag starts `true`: with every
    /// secondary `Unknown`, `counts_toward_quorum` already holds.
    pub fn new(secondaries: Vec<(u32, String, String)>) -> (Self, HashMap<u32, PauseGate>) {
        let mut map = HashMap::new();
        let mut gates = HashMap::new();
        let mut order = Vec::new();
        for (id, name, base_url) in secondaries {
            let (handle, gate) = pause_gate();
            order.push(id);
            map.insert(
                id,
                SecondaryHealth {
                    name,
                    base_url,
                    state: RwLock::new(HealthState::Unknown),
                    gate_handle: handle,
                },
            );
            gates.insert(id, gate);
        }
        let client = Client::builder()
            .connect_timeout(PROBE_CONNECT_TIMEOUT)
            .timeout(PROBE_READ_TIMEOUT)
            .build()
            .expect("building the heartbeat reqwest client");
        // Matches `any(...)` over the initial all-`Unknown` states: true
        // iff at least one secondary exists, same as the Python
        // original's `get_quorum()` over an empty `secondary_statuses`.
        let initial_quorum = !map.is_empty();
        (
            Self {
                secondaries: map,
                order,
                quorum: AtomicBool::new(initial_quorum),
                client,
            },
            gates,
        )
    }

    pub fn quorum(&self) -> bool {
        self.quorum.load(Ordering::Acquire)
    }

    pub fn state_of(&self, id: u32) -> Option<HealthState> {
        self.secondaries
            .get(&id)
            .map(|s| *s.state.read().expect("health state lock poisoned"))
    }

    /// `(name, state)` pairs in config order, for the health endpoint.
    pub fn health_rows(&self) -> Vec<(String, HealthState)> {
        self.order
            .iter()
            .filter_map(|id| self.secondaries.get(id))
            .map(|s| (s.name.clone(), *s.state.read().expect("health state lock poisoned")))
            .collect()
    }

    /// Runs the 5s probe loop until `cancel` fires.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(PROBE_INTERVAL) => {}
            }

            self.probe_round().await;
        }
    }

    /// Probes every secondary once and recomputes the quorum flag.
    /// Exposed so callers (and tests) can force an immediate round
    /// rather than wait out the first 5s interval.
    pub async fn probe_once(self: &Arc<Self>) {
        self.probe_round().await;
    }

    async fn probe_round(self: &Arc<Self>) {
        let probes = self.order.iter().filter_map(|id| {
            let secondary = self.secondaries.get(id)?;
            Some(self.clone().probe_one(*id, secondary))
        });
        join_all(probes).await;

        self.recompute_quorum();
    }

    async fn probe_one(self: Arc<Self>, _id: u32, secondary: &SecondaryHealth) {
        let prior = *secondary.state.read().expect("health state lock poisoned");
        if matches!(prior, HealthState::Unknown | HealthState::Healthy) {
            secondary.gate_handle.reset();
        }

        let url = format!("{}/health", secondary.base_url);
        let succeeded = self
            .client
            .get(&url)
            .send()
            .await
            .map(|resp| resp.status().is_success())
            .unwrap_or(false);

        let new_state = prior.next(succeeded);
        if new_state != prior {
            *secondary.state.write().expect("health state lock poisoned") = new_state;
            let suppress = prior == HealthState::Unknown && new_state == HealthState::Healthy;
            if !suppress {
                info!(secondary = %secondary.name, from = prior.as_str(), to = new_state.as_str(), "secondary health transition");
            }
        }
        if new_state == HealthState::Healthy {
            secondary.gate_handle.open();
        }
    }

    fn recompute_quorum(&self) {
        let any_reachable = self
            .secondaries
            .values()
            .any(|s| s.state.read().expect("health state lock poisoned").counts_toward_quorum());

        let prior = self.quorum.swap(any_reachable, Ordering::AcqRel);
        if prior && !any_reachable {
            info!("master switched to read-only: no secondaries quorum");
        } else if !prior && any_reachable {
            info!("secondaries quorum restored: master accepting appends again");
        }
    }
}
