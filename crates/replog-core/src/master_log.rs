//! The master's authoritative, dense, append-only log.
//!
//! Allocation and insertion happen under one critical section so ids
//! can never collide or leave a gap (invariant M1); `finalize` sets
//! `replicated_ts` under the same lock, set iff quorum acks were
//! observed (invariant M2, enforced jointly with the coordinator).

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use replog_types::{Message, MessageId, WriteConcern};

/// In-memory, id-ordered master log. Grows only, never pruned.
pub struct LogStore {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: BTreeMap<u64, Message>,
    next_id: u64,
}

impl LogStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Allocates the next dense id and inserts an unreplicated entry.
    pub fn allocate_and_append(&self, msg: String, w: WriteConcern) -> MessageId {
        let mut inner = self.inner.lock().expect("master log mutex poisoned");
        let id = MessageId(inner.next_id);
        inner.next_id += 1;
        inner.entries.insert(
            id.0,
            Message {
                id,
                msg,
                w,
                replicated_ts: None,
            },
        );
        id
    }

    /// Sets `replicated_ts` on quorum success. Idempotent.
    pub fn finalize(&self, id: MessageId, ts: DateTime<Utc>) {
        let mut inner = self.inner.lock().expect("master log mutex poisoned");
        if let Some(entry) = inner.entries.get_mut(&id.0) {
            if entry.replicated_ts.is_none() {
                entry.replicated_ts = Some(ts);
            }
        }
    }

    /// Entries in id order, for the read endpoint.
    pub fn snapshot(&self) -> Vec<Message> {
        let inner = self.inner.lock().expect("master log mutex poisoned");
        inner.entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("master log mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_starting_at_one() {
        let store = LogStore::new();
        let w = WriteConcern(3);
        let ids: Vec<_> = (0..5)
            .map(|i| store.allocate_and_append(format!("m{i}"), w))
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5].into_iter().map(MessageId).collect::<Vec<_>>());
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn finalize_sets_ts_once() {
        let store = LogStore::new();
        let id = store.allocate_and_append("a".into(), WriteConcern(1));
        let ts1 = Utc::now();
        store.finalize(id, ts1);
        let ts2 = ts1 + chrono::Duration::seconds(5);
        store.finalize(id, ts2);

        let snap = store.snapshot();
        assert_eq!(snap[0].replicated_ts, Some(ts1));
    }

    #[test]
    fn snapshot_is_id_ordered() {
        let store = LogStore::new();
        store.allocate_and_append("a".into(), WriteConcern(1));
        store.allocate_and_append("b".into(), WriteConcern(1));
        let snap = store.snapshot();
        assert_eq!(snap.iter().map(|m| m.id.0).collect::<Vec<_>>(), vec![1, 2]);
    }

    proptest::proptest! {
        /// P1 — after any sequence of appends, ids are exactly `1..N`, in
        /// the order they were allocated, regardless of how many entries
        /// went in or what write concern they carried.
        #[test]
        fn dense_ids_for_any_append_sequence(count in 0usize..200, w in 1u32..6) {
            let store = LogStore::new();
            for i in 0..count {
                store.allocate_and_append(format!("m{i}"), WriteConcern(w));
            }
            let snap = store.snapshot();
            let ids: Vec<u64> = snap.iter().map(|m| m.id.0).collect();
            let expected: Vec<u64> = (1..=count as u64).collect();
            proptest::prop_assert_eq!(ids, expected);
        }
    }
}
