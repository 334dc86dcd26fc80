//! The single-use release gate a replicator waits on while the
//! heartbeat controller re-verifies a secondary's reachability.
//!
//! Realised over a [`tokio::sync::watch`] channel carrying a boolean:
//! `open()` sets it `true` and wakes every subscriber, `reset()` installs
//! a fresh closed gate. Only the heartbeat controller ever mutates a
//! gate; replicators only read/await.

use tokio::sync::watch;

/// Producer half, held by the heartbeat controller for one secondary.
#[derive(Clone)]
pub struct PauseGateHandle {
    tx: watch::Sender<bool>,
}

impl PauseGateHandle {
    /// Opens the gate, waking every current and future waiter until the
    /// next [`reset`](Self::reset).
    pub fn open(&self) {
        let _ = self.tx.send(true);
    }

    /// Installs a fresh closed gate. Existing subscribers keep watching
    /// the same channel; they simply observe `false` again.
    pub fn reset(&self) {
        let _ = self.tx.send(false);
    }
}

/// Waiter half, cloned into every in-flight [`SecondaryClient`](crate::replication::client).
#[derive(Clone)]
pub struct PauseGate {
    rx: watch::Receiver<bool>,
}

impl PauseGate {
    /// Returns immediately if already open.
    pub async fn wait_open(&mut self) {
        if *self.rx.borrow() {
            return;
        }
        // `changed()` only errors if every sender dropped, which never
        // happens while the owning heartbeat task is alive.
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow() {
                return;
            }
        }
    }
}

/// Builds a new gate pair, initially closed.
pub fn pause_gate() -> (PauseGateHandle, PauseGate) {
    let (tx, rx) = watch::channel(false);
    (PauseGateHandle { tx }, PauseGate { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_closed_and_opens() {
        let (handle, mut gate) = pause_gate();
        let waiter = tokio::spawn(async move {
            gate.wait_open().await;
        });
        tokio::task::yield_now().await;
        handle.open();
        waiter.await.expect("waiter task");
    }

    #[tokio::test]
    async fn reset_closes_again() {
        let (handle, mut gate) = pause_gate();
        handle.open();
        gate.wait_open().await;
        handle.reset();

        let mut gate2 = gate.clone();
        let waiter = tokio::spawn(async move {
            gate2.wait_open().await;
        });
        tokio::task::yield_now().await;
        handle.open();
        waiter.await.expect("waiter task");
    }
}
