//! Partitions - one independent store per mode.

use std::path::Path;

use crate::mode::Mode;
use crate::store::{FileStore, InMemoryStore, StoreError};

/// The fiber and copper stores. Nothing is shared between the two, so a
/// query against one mode can never see the other's records.
#[derive(Clone, Default)]
pub struct Partitions<S> {
    fiber: S,
    copper: S,
}

impl<S> Partitions<S> {
    pub fn new(fiber: S, copper: S) -> Self {
        Self { fiber, copper }
    }

    /// Select the store for `mode`.
    pub fn resolve(&self, mode: Mode) -> &S {
        match mode {
            Mode::Fiber => &self.fiber,
            Mode::Copper => &self.copper,
        }
    }
}

impl Partitions<InMemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new(), InMemoryStore::new())
    }
}

impl Partitions<FileStore> {
    /// Open (or create) `fiber.db` and `copper.db` under `dir`.
    pub fn open_files(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        Ok(Self::new(
            FileStore::open(dir.join(file_name(Mode::Fiber)))?,
            FileStore::open(dir.join(file_name(Mode::Copper)))?,
        ))
    }
}

fn file_name(mode: Mode) -> String {
    format!("{}.db", mode)
}
