//! RecordStore - Abstract keyed storage for one partition's records.
//!
//! A store is a single ordered table of serialized records keyed by
//! `"collection:id"`. Backends only provide locked access to that table;
//! the typed CRUD operations and [`Tx`] transactions are default methods
//! shared by every backend.

mod file;
mod in_memory;
mod tx;

use std::collections::BTreeMap;
use std::fmt;

use crate::Record;

pub use file::FileStore;
pub use in_memory::InMemoryStore;
pub use tx::Tx;

/// The table every backend holds: record key to serialized record bytes.
pub type Table = BTreeMap<String, Vec<u8>>;

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The table lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// A record with this id already exists in the collection.
    Duplicate { collection: String, id: String },
    /// Serialization/deserialization error.
    Serde(String),
    /// Durable storage could not be read or written.
    Io(String),
    /// A transaction was rolled back by its caller.
    Aborted,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Duplicate { collection, id } => {
                write!(f, "record already exists: {}:{}", collection, id)
            }
            StoreError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            StoreError::Io(msg) => write!(f, "storage io error: {}", msg),
            StoreError::Aborted => write!(f, "transaction aborted"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Abstract keyed storage for records.
///
/// Implementors supply shared and exclusive access to their [`Table`].
/// A durable backend must not persist anything when the closure passed to
/// `with_table_mut` returns an error.
pub trait RecordStore: Send + Sync {
    /// Run `f` with shared access to the table.
    fn with_table<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Table) -> Result<T, StoreError>,
    ) -> Result<T, StoreError>;

    /// Run `f` with exclusive access to the table.
    fn with_table_mut<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Table) -> Result<T, StoreError>,
    ) -> Result<T, StoreError>;

    /// Run several writes as one unit under the exclusive lock. If `f`
    /// returns an error every write it made is undone.
    fn transaction<T, E>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Tx<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut outcome = None;
        let locked = self.with_table_mut(operation, |table| {
            let mut tx = Tx::new(table);
            match f(&mut tx) {
                Ok(value) => {
                    outcome = Some(Ok(value));
                    Ok(())
                }
                Err(err) => {
                    tx.rollback();
                    outcome = Some(Err(err));
                    Err(StoreError::Aborted)
                }
            }
        });
        match (locked, outcome) {
            (Ok(()), Some(result)) => result,
            (Err(StoreError::Aborted), Some(Err(err))) => Err(err),
            // Lock poisoned, or the backend failed to persist a committed tx.
            (Err(err), _) => Err(err.into()),
            (Ok(()), None) => Err(StoreError::Aborted.into()),
        }
    }

    /// Get a record by id. Returns None if not found.
    fn get<R: Record>(&self, id: &str) -> Result<Option<R>, StoreError> {
        self.with_table("get", |table| tx::get(table, id))
    }

    /// Every record in the collection, in id order.
    fn list<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        self.with_table("list", |table| tx::find(table, &|_: &R| true))
    }

    /// Records matching a predicate, in id order.
    fn find<R: Record>(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        self.with_table("find", |table| tx::find(table, predicate))
    }

    /// Number of records in the collection.
    fn count<R: Record>(&self) -> Result<usize, StoreError> {
        self.with_table("count", |table| Ok(tx::count::<R>(table)))
    }

    /// Insert a new record. Fails if the id already exists.
    fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.transaction("insert", |tx| tx.insert(record))
    }

    /// Insert many records at once. Fails without writing anything if any
    /// id is already present or repeated.
    fn insert_all<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        self.transaction("insert_all", |tx| tx.insert_all(records))
    }

    /// Insert or overwrite a record.
    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.transaction("put", |tx| tx.put(record))
    }

    /// Read-modify-write a record under one exclusive lock.
    /// Returns false (and calls nothing) when the id is absent.
    fn update_with<R: Record>(
        &self,
        id: &str,
        f: impl FnOnce(&mut R),
    ) -> Result<bool, StoreError> {
        self.transaction("update", |tx| tx.update_with(id, f))
    }

    /// Delete a record by id. Returns true if it existed.
    fn delete<R: Record>(&self, id: &str) -> Result<bool, StoreError> {
        self.transaction("delete", |tx| Ok(tx.delete::<R>(id)))
    }

    /// Delete every record matching a predicate. Returns how many were removed.
    fn delete_where<R: Record>(&self, predicate: &dyn Fn(&R) -> bool) -> Result<usize, StoreError> {
        self.transaction("delete_where", |tx| tx.delete_where(predicate))
    }

    /// Delete the whole collection. Returns how many records were removed.
    fn clear<R: Record>(&self) -> Result<usize, StoreError> {
        self.transaction("clear", |tx| Ok(tx.clear::<R>()))
    }
}
