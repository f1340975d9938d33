use std::fmt;

use crate::snapshot::SnapshotError;
use crate::store::StoreError;

/// A single failed entry of a bulk update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub id: String,
    pub error: StoreError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The backing store failed; the operation had no effect.
    Store(StoreError),
    /// A save's snapshot could not be encoded or decoded.
    Snapshot(SnapshotError),
    /// `load_save` was asked for a save that does not exist.
    SaveNotFound(String),
    /// Some entries of a bulk update failed. `applied` lists the ids that
    /// were written anyway and `missing` those skipped as absent; nothing is
    /// rolled back.
    PartialBatch {
        applied: Vec<String>,
        missing: Vec<String>,
        failures: Vec<BatchFailure>,
    },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Store(err) => write!(f, "{}", err),
            ServiceError::Snapshot(err) => write!(f, "{}", err),
            ServiceError::SaveNotFound(id) => write!(f, "save not found: {}", id),
            ServiceError::PartialBatch {
                applied,
                missing,
                failures,
            } => write!(
                f,
                "bulk update partially failed ({} applied, {} missing, {} failed{})",
                applied.len(),
                missing.len(),
                failures.len(),
                failures
                    .first()
                    .map(|first| format!(", first: {}: {}", first.id, first.error))
                    .unwrap_or_default()
            ),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Store(err) => Some(err),
            ServiceError::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl From<SnapshotError> for ServiceError {
    fn from(err: SnapshotError) -> Self {
        ServiceError::Snapshot(err)
    }
}
