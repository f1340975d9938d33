use serde::{Deserialize, Serialize};

use super::SnapshotError;
use crate::{Cable, Circuit};

/// Schema version written into every new snapshot.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Full cable + circuit state of one partition, as stored in `Save::data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBlob {
    pub schema_version: u32,
    pub cables: Vec<Cable>,
    pub circuits: Vec<Circuit>,
}

/// Only the header, read before committing to the full schema.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Header {
    schema_version: Option<u32>,
}

#[derive(Deserialize)]
struct Body {
    cables: Vec<Cable>,
    circuits: Vec<Circuit>,
}

impl SnapshotBlob {
    pub fn new(cables: Vec<Cable>, circuits: Vec<Circuit>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            cables,
            circuits,
        }
    }

    pub fn encode(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    /// Decode a stored blob. Blobs written before versioning carry no
    /// `schemaVersion` and are read as version 1.
    pub fn decode(data: &str) -> Result<Self, SnapshotError> {
        let header: Header =
            serde_json::from_str(data).map_err(|e| SnapshotError::Malformed(e.to_string()))?;

        let schema_version = match header.schema_version {
            Some(version) if version > SNAPSHOT_SCHEMA_VERSION => {
                return Err(SnapshotError::UnsupportedVersion {
                    found: version,
                    supported: SNAPSHOT_SCHEMA_VERSION,
                });
            }
            Some(version) => version,
            None => {
                tracing::warn!("decoding unversioned snapshot as schema version 1");
                1
            }
        };

        let body: Body =
            serde_json::from_str(data).map_err(|e| SnapshotError::Malformed(e.to_string()))?;

        Ok(Self {
            schema_version,
            cables: body.cables,
            circuits: body.circuits,
        })
    }
}
