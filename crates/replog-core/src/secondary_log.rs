//! The secondary's gap-tolerant, idempotent log.
//!
//! Mirrors `original_source/secondary.py`'s `do_POST` insertion logic
//! exactly: pad with gaps up to the target slot, append, fill a gap, or
//! no-op on an already-present slot (invariants S1-S3). The artificial
//! `"wait"` delay (§4.6 of the spec) is applied by the caller *before*
//! calling [`SecondaryLogStore::insert`], matching the Python original
//! where the `time.sleep(10)` happens before the lock is touched.

use std::sync::Mutex;

use chrono::Utc;
use replog_types::Message;

/// Outcome of an insert attempt, useful for logging at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The slot was empty and is now filled.
    Inserted,
    /// The slot was already present; the log is unchanged.
    AlreadyPresent,
}

/// Gap-aware, idempotent per-secondary log.
pub struct SecondaryLogStore {
    inner: Mutex<Vec<Option<Message>>>,
}

impl SecondaryLogStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Inserts `msg` at slot `id - 1`. Sets `replicated_ts` to now on
    /// first fill only; a duplicate delivery is a successful no-op.
    pub fn insert(&self, mut msg: Message) -> InsertOutcome {
        let idx = msg.id.slot_index();
        let mut log = self.inner.lock().expect("secondary log mutex poisoned");

        if idx >= log.len() {
            log.resize(idx + 1, None);
        }

        if log[idx].is_some() {
            return InsertOutcome::AlreadyPresent;
        }

        msg.replicated_ts = Some(Utc::now());
        log[idx] = Some(msg);
        InsertOutcome::Inserted
    }

    /// The longest gap-free prefix starting at id 1 (invariant S3).
    /// Trailing present-but-not-contiguous entries stay in storage but
    /// are invisible to readers until the gap closes.
    pub fn readable_prefix(&self) -> Vec<Message> {
        let log = self.inner.lock().expect("secondary log mutex poisoned");
        log.iter()
            .take_while(|slot| slot.is_some())
            .map(|slot| slot.clone().expect("take_while guarantees Some"))
            .collect()
    }

    /// Whether `id` is present, used by tests/diagnostics.
    #[cfg(test)]
    fn contains(&self, id: u64) -> bool {
        let log = self.inner.lock().expect("secondary log mutex poisoned");
        log.get((id - 1) as usize).map(|s| s.is_some()).unwrap_or(false)
    }
}

impl Default for SecondaryLogStore {
    fn default() -> Self {
        Self::new()
    }
}
