//! Splice service - the single entry point for the editor.
//!
//! A `SpliceService<S>` owns one store per mode and exposes cable, circuit
//! and save operations. Every operation takes the mode explicitly; the
//! service keeps no notion of a current mode.
//!
//! ## Example
//!
//! ```ignore
//! use splice_store::{Mode, NewCable, NewCircuit, SpliceService};
//!
//! let service = SpliceService::in_memory();
//! let cable = service.create_cable(NewCable::new("Trunk1", "trunk"), Mode::Fiber)?;
//! service.create_circuit(NewCircuit::new(&cable.id, 1, 1, 12), Mode::Fiber)?;
//!
//! let save = service.create_save("before cutover", Mode::Fiber)?;
//! service.reset_all_data(Mode::Fiber)?;
//! service.load_save(&save.id, Mode::Fiber)?;
//! ```
//!
//! Multi-step writes (cascade delete, save + retention, restore, reset) run
//! as one store transaction, so other callers never observe the steps in
//! between. `bulk_update_circuits` is the exception: its entries are
//! independent writes and a failure in one does not undo the others.

mod cables;
mod circuits;
mod saves;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::mode::Mode;
use crate::partition::Partitions;
use crate::store::{FileStore, InMemoryStore, RecordStore, StoreError, Tx};

pub use circuits::BulkUpdateOutcome;

/// Source of `Save::created_at` timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct SpliceService<S> {
    partitions: Partitions<S>,
    config: ServiceConfig,
    clock: Clock,
}

impl<S: RecordStore> SpliceService<S> {
    pub fn new(partitions: Partitions<S>, config: ServiceConfig) -> Self {
        Self {
            partitions,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock used to stamp saves.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn partitions(&self) -> &Partitions<S> {
        &self.partitions
    }

    fn store(&self, mode: Mode) -> &S {
        self.partitions.resolve(mode)
    }

    fn transaction<T>(
        &self,
        mode: Mode,
        operation: &'static str,
        f: impl FnOnce(&mut Tx<'_>) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        self.store(mode).transaction(operation, f)
    }
}

impl SpliceService<InMemoryStore> {
    /// A service over two fresh in-memory partitions with default config.
    pub fn in_memory() -> Self {
        Self::new(Partitions::in_memory(), ServiceConfig::default())
    }
}

impl SpliceService<FileStore> {
    /// Open the file-backed partitions under `config.data_dir`.
    pub fn open(config: ServiceConfig) -> Result<Self, ServiceError> {
        let Some(dir) = config.data_dir.clone() else {
            return Err(StoreError::Io("no data directory configured".into()).into());
        };
        let partitions = Partitions::open_files(&dir)?;
        tracing::info!(dir = %dir.display(), "opened splice store");
        Ok(Self::new(partitions, config))
    }
}
