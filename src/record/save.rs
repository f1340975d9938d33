use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Record;

/// A named, immutable snapshot of one partition's cables and circuits.
///
/// `data` is the encoded [`SnapshotBlob`](crate::SnapshotBlob); the store
/// never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "saves")]
#[serde(rename_all = "camelCase")]
pub struct Save {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub data: String,
}
