use super::SpliceService;
use crate::error::ServiceError;
use crate::mode::Mode;
use crate::record::new_id;
use crate::snapshot::SnapshotBlob;
use crate::store::RecordStore;
use crate::{Cable, Circuit, Save};

/// Newest first; equal timestamps fall back to id so the order is total.
fn sort_newest_first(saves: &mut [Save]) {
    saves.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

impl<S: RecordStore> SpliceService<S> {
    /// All saves in the partition, most recent first.
    pub fn list_saves(&self, mode: Mode) -> Result<Vec<Save>, ServiceError> {
        let mut saves = self.store(mode).list::<Save>()?;
        sort_newest_first(&mut saves);
        Ok(saves)
    }

    pub fn get_save(&self, id: &str, mode: Mode) -> Result<Option<Save>, ServiceError> {
        Ok(self.store(mode).get(id)?)
    }

    /// Snapshot every cable and circuit of the partition under `name`, then
    /// evict the oldest saves beyond the retention cap.
    ///
    /// The new save is never evicted, even when the clock has stepped back
    /// behind older saves. A retention of 0 is treated as 1.
    pub fn create_save(&self, name: impl Into<String>, mode: Mode) -> Result<Save, ServiceError> {
        let retention = self.config.save_retention.max(1);
        let created_at = (self.clock)();
        let name = name.into();

        let (save, evicted) = self.transaction(mode, "create_save", |tx| {
            let blob = SnapshotBlob::new(tx.list::<Cable>()?, tx.list::<Circuit>()?);
            let save = Save {
                id: new_id(),
                name,
                created_at,
                data: blob.encode()?,
            };
            tx.insert(&save)?;

            let mut older = tx.find::<Save>(&|other| other.id != save.id)?;
            sort_newest_first(&mut older);
            let mut evicted = 0;
            for old in older.iter().skip(retention - 1) {
                if tx.delete::<Save>(&old.id) {
                    evicted += 1;
                }
            }
            Ok((save, evicted))
        })?;

        tracing::info!(%mode, id = %save.id, name = %save.name, evicted, "created save");
        Ok(save)
    }

    /// Replace the partition's cables and circuits with the contents of a
    /// save. Whatever was there before is discarded.
    ///
    /// Fails with `ServiceError::SaveNotFound` for an unknown id. The blob is
    /// decoded before anything is cleared, and the whole restore commits as
    /// one unit, so a failed load leaves current state untouched.
    pub fn load_save(&self, id: &str, mode: Mode) -> Result<(), ServiceError> {
        let (cables, circuits) = self.transaction(mode, "load_save", |tx| {
            let save = tx
                .get::<Save>(id)?
                .ok_or_else(|| ServiceError::SaveNotFound(id.to_string()))?;
            let blob = SnapshotBlob::decode(&save.data)?;

            tx.clear::<Cable>();
            tx.clear::<Circuit>();
            tx.insert_all(&blob.cables)?;
            tx.insert_all(&blob.circuits)?;
            Ok((blob.cables.len(), blob.circuits.len()))
        })?;

        tracing::info!(%mode, id, cables, circuits, "restored save");
        Ok(())
    }

    /// Delete a save. Returns whether it existed.
    pub fn delete_save(&self, id: &str, mode: Mode) -> Result<bool, ServiceError> {
        Ok(self.store(mode).delete::<Save>(id)?)
    }

    /// Remove every cable and circuit in the partition. Saves are kept.
    pub fn reset_all_data(&self, mode: Mode) -> Result<(), ServiceError> {
        let (cables, circuits) = self.transaction(mode, "reset_all_data", |tx| {
            Ok((tx.clear::<Cable>(), tx.clear::<Circuit>()))
        })?;
        tracing::info!(%mode, cables, circuits, "reset partition");
        Ok(())
    }
}
