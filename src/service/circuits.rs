use std::num::NonZeroUsize;
use std::thread;

use super::SpliceService;
use crate::error::{BatchFailure, ServiceError};
use crate::mode::Mode;
use crate::record::new_id;
use crate::store::{RecordStore, StoreError};
use crate::{Circuit, CircuitPatch, CircuitUpdate, NewCircuit};

/// Result of a bulk update in which every entry was written or skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkUpdateOutcome {
    /// Ids that were updated, in request order.
    pub applied: Vec<String>,
    /// Ids that did not exist and were skipped.
    pub missing: Vec<String>,
}

impl<S: RecordStore> SpliceService<S> {
    /// All circuits in the partition. No particular order is promised.
    pub fn list_circuits(&self, mode: Mode) -> Result<Vec<Circuit>, ServiceError> {
        Ok(self.store(mode).list()?)
    }

    pub fn get_circuit(&self, id: &str, mode: Mode) -> Result<Option<Circuit>, ServiceError> {
        Ok(self.store(mode).get(id)?)
    }

    /// Circuits on `cable_id`, ascending by `position`. Circuits sharing a
    /// position keep a fixed relative order (by id).
    pub fn list_circuits_by_cable(
        &self,
        cable_id: &str,
        mode: Mode,
    ) -> Result<Vec<Circuit>, ServiceError> {
        let mut circuits = self
            .store(mode)
            .find::<Circuit>(&|circuit| circuit.cable_id == cable_id)?;
        circuits.sort_by_key(|circuit| circuit.position);
        Ok(circuits)
    }

    /// Create a circuit. It always starts unspliced and without a feed.
    pub fn create_circuit(&self, circuit: NewCircuit, mode: Mode) -> Result<Circuit, ServiceError> {
        let circuit = circuit.into_circuit(new_id());
        self.store(mode).insert(&circuit)?;
        tracing::debug!(
            %mode,
            id = %circuit.id,
            cable_id = %circuit.cable_id,
            position = circuit.position,
            "created circuit"
        );
        Ok(circuit)
    }

    /// Merge `patch` into the circuit. Returns false, writing nothing, when
    /// the id does not exist.
    pub fn update_circuit(
        &self,
        id: &str,
        patch: CircuitPatch,
        mode: Mode,
    ) -> Result<bool, ServiceError> {
        let found = self
            .store(mode)
            .update_with::<Circuit>(id, |circuit| circuit.apply(patch))?;
        if !found {
            tracing::debug!(%mode, id, "update skipped, circuit not found");
        }
        Ok(found)
    }

    /// Apply many circuit updates concurrently and wait for all of them.
    ///
    /// Each entry is its own write. When some fail the rest still land and
    /// `ServiceError::PartialBatch` reports every entry's fate; callers that need
    /// to know the final state should re-read.
    pub fn bulk_update_circuits(
        &self,
        updates: Vec<CircuitUpdate>,
        mode: Mode,
    ) -> Result<BulkUpdateOutcome, ServiceError> {
        if updates.is_empty() {
            return Ok(BulkUpdateOutcome::default());
        }

        let store = self.store(mode);
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(updates.len());
        let chunk_size = updates.len().div_ceil(workers);

        let mut remaining = updates.into_iter();
        let chunks: Vec<Vec<CircuitUpdate>> = (0..workers)
            .map(|_| remaining.by_ref().take(chunk_size).collect())
            .collect();

        let results: Vec<(String, Result<bool, StoreError>)> = thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .into_iter()
                            .map(|CircuitUpdate { id, changes }| {
                                let result = store
                                    .update_with::<Circuit>(&id, |circuit| circuit.apply(changes));
                                (id, result)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });

        let mut outcome = BulkUpdateOutcome::default();
        let mut failures = Vec::new();
        for (id, result) in results {
            match result {
                Ok(true) => outcome.applied.push(id),
                Ok(false) => outcome.missing.push(id),
                Err(error) => failures.push(BatchFailure { id, error }),
            }
        }

        if !failures.is_empty() {
            tracing::warn!(
                %mode,
                applied = outcome.applied.len(),
                missing = outcome.missing.len(),
                failed = failures.len(),
                "bulk circuit update partially failed"
            );
            return Err(ServiceError::PartialBatch {
                applied: outcome.applied,
                missing: outcome.missing,
                failures,
            });
        }

        tracing::debug!(
            %mode,
            applied = outcome.applied.len(),
            missing = outcome.missing.len(),
            "bulk updated circuits"
        );
        Ok(outcome)
    }

    /// Delete a circuit. Returns whether it existed.
    pub fn delete_circuit(&self, id: &str, mode: Mode) -> Result<bool, ServiceError> {
        Ok(self.store(mode).delete::<Circuit>(id)?)
    }
}
