//! Shared data model for the replicated append-only log.
//!
//! This crate holds only plain data: the [`Message`] wire type, the ids
//! and write-concern newtypes that govern it, and the small request/
//! response shapes `replog-master` and `replog-secondary` exchange over
//! HTTP. No I/O, no locking, no replication logic lives here — that is
//! `replog-core`'s job.

mod message;
mod wire;

pub use message::{Message, MessageId, WriteConcern};
pub use wire::{AppendRequest, SecondaryHealthRow, SecondaryInsertRequest};
