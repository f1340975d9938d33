//! InMemoryStore - BTreeMap-backed record store for tests and ephemeral sessions.

use std::sync::{Arc, RwLock};

use super::{RecordStore, StoreError, Table};

/// In-memory record store backed by `Arc<RwLock<BTreeMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage).
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<RwLock<Table>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryStore {
    fn with_table<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Table) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))?;
        f(&storage)
    }

    fn with_table_mut<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Table) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))?;
        f(&mut storage)
    }
}
