//! A countdown latch that becomes a permanent no-op once open.
//!
//! Equivalent to the Python original's `CountDownLatch`
//! (`original_source/master.py`): `count_down` decrements and wakes all
//! waiters exactly once, when the count reaches zero; any call after
//! that point — late acks from still-retrying replicators — is ignored.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Countdown latch initialised to `w - 1` required secondary acks.
pub struct Latch {
    remaining: AtomicUsize,
    notify: Notify,
}

impl Latch {
    /// Builds a latch that opens immediately if `count` is zero.
    pub fn new(count: usize) -> Arc<Self> {
        let latch = Arc::new(Self {
            remaining: AtomicUsize::new(count),
            notify: Notify::new(),
        });
        if count == 0 {
            latch.notify.notify_waiters();
        }
        latch
    }

    /// Decrements the latch. A no-op once the latch has already opened.
    pub fn count_down(&self) {
        loop {
            let current = self.remaining.load(Ordering::Acquire);
            if current == 0 {
                return;
            }
            if self
                .remaining
                .compare_exchange(current, current - 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                if current - 1 == 0 {
                    self.notify.notify_waiters();
                }
                return;
            }
        }
    }

    /// Returns immediately if already open; otherwise waits to be woken.
    ///
    /// Uses a short poll loop around [`Notify`] to close the race
    /// between a `notify_waiters` call that lands before `notified()`
    /// is registered and this waiter's subscription.
    pub async fn wait(&self) {
        loop {
            if self.is_open() {
                return;
            }
            let notified = self.notify.notified();
            if self.is_open() {
                return;
            }
            notified.await;
        }
    }

    pub fn is_open(&self) -> bool {
        self.remaining.load(Ordering::Acquire) == 0
    }
}
