//! Mode-partitioned persistence for cable-splice editing.
//!
//! Cables, circuits and named saves live in one of two isolated partitions
//! (`fiber` and `copper`). [`SpliceService`] is the only way in: it selects
//! the partition for each call, cascades cable deletes to their circuits,
//! snapshots and restores whole partitions, and caps how many saves are kept.

// Lets `#[derive(Record)]` expand to `::splice_store::Record` inside this crate too.
extern crate self as splice_store;

mod config;
mod error;
mod mode;
mod partition;
mod record;
mod service;
mod snapshot;
mod store;

pub use config::{ServiceConfig, DEFAULT_SAVE_RETENTION};
pub use error::{BatchFailure, ServiceError};
pub use mode::{Mode, ParseModeError, RibbonDefaults};
pub use partition::Partitions;
pub use record::{
    Cable, CablePatch, CableType, Circuit, CircuitPatch, CircuitUpdate, Feed, NewCable,
    NewCircuit, Record, Save,
};
pub use service::{BulkUpdateOutcome, Clock, SpliceService};
pub use snapshot::{SnapshotBlob, SnapshotError, SNAPSHOT_SCHEMA_VERSION};
pub use store::{FileStore, InMemoryStore, RecordStore, StoreError, Table, Tx};

// Re-export the derive macro alongside the trait it implements.
pub use splice_store_macros::Record;
