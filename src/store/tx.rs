//! Tx - typed, all-or-nothing access to a store's table.

use super::{StoreError, Table};
use crate::Record;

fn make_key(collection: &str, id: &str) -> String {
    format!("{}:{}", collection, id)
}

pub(super) fn encode<R: Record>(record: &R) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))
}

pub(super) fn decode<R: Record>(bytes: &[u8]) -> Result<R, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))
}

/// Keys of every record in `R`'s collection, in key order.
fn collection_keys<R: Record>(table: &Table) -> Vec<String> {
    let prefix = format!("{}:", R::COLLECTION);
    table
        .range(prefix.clone()..)
        .take_while(|(key, _)| key.starts_with(&prefix))
        .map(|(key, _)| key.clone())
        .collect()
}

pub(super) fn get<R: Record>(table: &Table, id: &str) -> Result<Option<R>, StoreError> {
    table
        .get(&make_key(R::COLLECTION, id))
        .map(|bytes| decode::<R>(bytes))
        .transpose()
}

pub(super) fn find<R: Record>(
    table: &Table,
    predicate: &dyn Fn(&R) -> bool,
) -> Result<Vec<R>, StoreError> {
    let prefix = format!("{}:", R::COLLECTION);
    let mut results = Vec::new();
    for (_, bytes) in table
        .range(prefix.clone()..)
        .take_while(|(key, _)| key.starts_with(&prefix))
    {
        let record = decode::<R>(bytes)?;
        if predicate(&record) {
            results.push(record);
        }
    }
    Ok(results)
}

pub(super) fn count<R: Record>(table: &Table) -> usize {
    collection_keys::<R>(table).len()
}

/// A unit of work over one store's table.
///
/// Every write is recorded in an undo log. When the closure passed to
/// [`RecordStore::transaction`](super::RecordStore::transaction) fails, the
/// log is replayed backwards so the table is left exactly as it was.
pub struct Tx<'a> {
    table: &'a mut Table,
    undo: Vec<(String, Option<Vec<u8>>)>,
}

impl<'a> Tx<'a> {
    pub(super) fn new(table: &'a mut Table) -> Self {
        Self {
            table,
            undo: Vec::new(),
        }
    }

    pub(super) fn rollback(self) {
        for (key, previous) in self.undo.into_iter().rev() {
            match previous {
                Some(bytes) => {
                    self.table.insert(key, bytes);
                }
                None => {
                    self.table.remove(&key);
                }
            }
        }
    }

    fn set(&mut self, key: String, bytes: Vec<u8>) {
        let previous = self.table.insert(key.clone(), bytes);
        self.undo.push((key, previous));
    }

    fn remove(&mut self, key: &str) -> bool {
        match self.table.remove(key) {
            Some(previous) => {
                self.undo.push((key.to_string(), Some(previous)));
                true
            }
            None => false,
        }
    }

    pub fn get<R: Record>(&self, id: &str) -> Result<Option<R>, StoreError> {
        get(&*self.table, id)
    }

    pub fn list<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        find(&*self.table, &|_: &R| true)
    }

    pub fn find<R: Record>(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        find(&*self.table, predicate)
    }

    pub fn count<R: Record>(&self) -> usize {
        count::<R>(&*self.table)
    }

    pub fn insert<R: Record>(&mut self, record: &R) -> Result<(), StoreError> {
        let key = make_key(R::COLLECTION, record.id());
        if self.table.contains_key(&key) {
            return Err(StoreError::Duplicate {
                collection: R::COLLECTION.to_string(),
                id: record.id().to_string(),
            });
        }
        let bytes = encode(record)?;
        self.set(key, bytes);
        Ok(())
    }

    pub fn insert_all<R: Record>(&mut self, records: &[R]) -> Result<(), StoreError> {
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }

    pub fn put<R: Record>(&mut self, record: &R) -> Result<(), StoreError> {
        let bytes = encode(record)?;
        self.set(make_key(R::COLLECTION, record.id()), bytes);
        Ok(())
    }

    pub fn update_with<R: Record>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut R),
    ) -> Result<bool, StoreError> {
        let Some(mut record) = self.get::<R>(id)? else {
            return Ok(false);
        };
        f(&mut record);
        let bytes = encode(&record)?;
        self.set(make_key(R::COLLECTION, id), bytes);
        Ok(true)
    }

    pub fn delete<R: Record>(&mut self, id: &str) -> bool {
        self.remove(&make_key(R::COLLECTION, id))
    }

    pub fn delete_where<R: Record>(
        &mut self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<usize, StoreError> {
        let mut doomed = Vec::new();
        for key in collection_keys::<R>(&*self.table) {
            if let Some(bytes) = self.table.get(&key) {
                if predicate(&decode::<R>(bytes)?) {
                    doomed.push(key);
                }
            }
        }
        for key in &doomed {
            self.remove(key);
        }
        Ok(doomed.len())
    }

    pub fn clear<R: Record>(&mut self) -> usize {
        let keys = collection_keys::<R>(&*self.table);
        for key in &keys {
            self.remove(key);
        }
        keys.len()
    }
}
