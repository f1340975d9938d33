//! Records - the typed rows held by each partition's store.
//!
//! Every record type names its collection (the "table") and exposes its id.
//! Stores key records as `"collection:id"`, so the three collections of a
//! partition can share one backing map.
//!
//! ## Example
//!
//! ```ignore
//! use splice_store::Record;
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(collection = "cables")]
//! struct Cable {
//!     #[record(id)]
//!     pub id: String,
//!     pub name: String,
//! }
//! ```

mod cable;
mod circuit;
mod save;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be persisted in a [`RecordStore`](crate::RecordStore).
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "cables", "saves").
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record instance.
    fn id(&self) -> &str;
}

/// Allocate a fresh globally unique record id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub use cable::{Cable, CablePatch, CableType, NewCable};
pub use circuit::{Circuit, CircuitPatch, CircuitUpdate, Feed, NewCircuit};
pub use save::Save;
