//! FileStore - durable record store persisted to a single local file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::{RecordStore, StoreError, Table};

/// Durable record store.
///
/// The table is held in memory and the whole table is rewritten to `path`
/// after every successful mutation (bitcode-encoded, via a temp file and a
/// rename). A mutation whose write fails is not applied in memory either.
/// Clone-friendly (cloning shares the same underlying storage and file).
#[derive(Clone)]
pub struct FileStore {
    path: Arc<PathBuf>,
    storage: Arc<RwLock<Table>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let table = if path.exists() {
            let bytes = fs::read(&path)?;
            let table: Table = bitcode::deserialize(&bytes)
                .map_err(|e| StoreError::Serde(format!("{}: {e}", path.display())))?;
            tracing::debug!(path = %path.display(), rows = table.len(), "opened store file");
            table
        } else {
            Table::new()
        };

        Ok(Self {
            path: Arc::new(path),
            storage: Arc::new(RwLock::new(table)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, table: &Table) -> Result<(), StoreError> {
        let bytes = bitcode::serialize(table)
            .map_err(|e| StoreError::Serde(format!("store encode: {e}")))?;
        let tmp = self.path.with_extension("tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, self.path.as_path())?;
        Ok(())
    }
}

impl RecordStore for FileStore {
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

        let mut staged = storage.clone();
        let result = f(&mut staged)?;
        if staged != *storage {
            self.persist(&staged)?;
            *storage = staged;
        }
        Ok(result)
    }
}
