//! Snapshots - the encoded partition state carried by a `Save`.

mod blob;

use std::fmt;

pub use blob::{SnapshotBlob, SNAPSHOT_SCHEMA_VERSION};

/// Error type for snapshot encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The blob is not a valid snapshot document.
    Malformed(String),
    /// The blob was written by a newer schema than this build understands.
    UnsupportedVersion { found: u32, supported: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Malformed(msg) => write!(f, "malformed snapshot: {}", msg),
            SnapshotError::UnsupportedVersion { found, supported } => write!(
                f,
                "snapshot schema version {} is newer than supported version {}",
                found, supported
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}
