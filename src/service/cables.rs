use super::SpliceService;
use crate::error::ServiceError;
use crate::mode::Mode;
use crate::record::new_id;
use crate::store::RecordStore;
use crate::{Cable, CablePatch, Circuit, NewCable};

impl<S: RecordStore> SpliceService<S> {
    /// All cables in the partition. No particular order is promised.
    pub fn list_cables(&self, mode: Mode) -> Result<Vec<Cable>, ServiceError> {
        Ok(self.store(mode).list()?)
    }

    pub fn get_cable(&self, id: &str, mode: Mode) -> Result<Option<Cable>, ServiceError> {
        Ok(self.store(mode).get(id)?)
    }

    /// Create a cable. Without an explicit ribbon size the mode default
    /// from the config is used.
    pub fn create_cable(&self, cable: NewCable, mode: Mode) -> Result<Cable, ServiceError> {
        let ribbon_size = cable
            .ribbon_size
            .unwrap_or_else(|| self.config.ribbon_defaults.for_mode(mode));
        let cable = Cable {
            id: new_id(),
            name: cable.name,
            cable_type: cable.cable_type,
            ribbon_size,
        };
        self.store(mode).insert(&cable)?;
        tracing::debug!(%mode, id = %cable.id, ribbon_size, "created cable");
        Ok(cable)
    }

    /// Merge `patch` into the cable. Returns false, writing nothing, when
    /// the id does not exist.
    pub fn update_cable(
        &self,
        id: &str,
        patch: CablePatch,
        mode: Mode,
    ) -> Result<bool, ServiceError> {
        let found = self
            .store(mode)
            .update_with::<Cable>(id, |cable| cable.apply(patch))?;
        if !found {
            tracing::debug!(%mode, id, "update skipped, cable not found");
        }
        Ok(found)
    }

    /// Delete a cable together with every circuit on it.
    ///
    /// Circuits go first and both deletes commit together; if either step
    /// fails nothing is removed. Returns whether the cable existed.
    pub fn delete_cable(&self, id: &str, mode: Mode) -> Result<bool, ServiceError> {
        let (circuits, existed) = self.transaction(mode, "delete_cable", |tx| {
            let circuits = tx.delete_where::<Circuit>(&|circuit| circuit.cable_id == id)?;
            Ok((circuits, tx.delete::<Cable>(id)))
        })?;
        tracing::info!(%mode, id, circuits, existed, "deleted cable");
        Ok(existed)
    }
}
