use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Record;

/// Classification of a cable. Unknown tags survive a round trip as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CableType {
    Trunk,
    Distribution,
    Feeder,
    Drop,
    Other(String),
}

impl CableType {
    pub fn as_str(&self) -> &str {
        match self {
            CableType::Trunk => "trunk",
            CableType::Distribution => "distribution",
            CableType::Feeder => "feeder",
            CableType::Drop => "drop",
            CableType::Other(tag) => tag,
        }
    }
}

impl From<String> for CableType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "trunk" => CableType::Trunk,
            "distribution" => CableType::Distribution,
            "feeder" => CableType::Feeder,
            "drop" => CableType::Drop,
            _ => CableType::Other(tag),
        }
    }
}

impl From<&str> for CableType {
    fn from(tag: &str) -> Self {
        CableType::from(tag.to_string())
    }
}

impl From<CableType> for String {
    fn from(kind: CableType) -> Self {
        match kind {
            CableType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical cable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "cables")]
#[serde(rename_all = "camelCase")]
pub struct Cable {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cable_type: CableType,
    /// Fibers per ribbon (fiber mode) or pairs per binder (copper mode).
    pub ribbon_size: u32,
}

impl Cable {
    pub(crate) fn apply(&mut self, patch: CablePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(cable_type) = patch.cable_type {
            self.cable_type = cable_type;
        }
        if let Some(ribbon_size) = patch.ribbon_size {
            self.ribbon_size = ribbon_size;
        }
    }
}

/// Fields supplied when creating a cable. A `None` ribbon size takes the
/// mode default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCable {
    pub name: String,
    #[serde(rename = "type")]
    pub cable_type: CableType,
    #[serde(default)]
    pub ribbon_size: Option<u32>,
}

impl NewCable {
    pub fn new(name: impl Into<String>, cable_type: impl Into<CableType>) -> Self {
        Self {
            name: name.into(),
            cable_type: cable_type.into(),
            ribbon_size: None,
        }
    }

    pub fn with_ribbon_size(mut self, ribbon_size: u32) -> Self {
        self.ribbon_size = Some(ribbon_size);
        self
    }
}

/// Partial cable update. The id is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CablePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub cable_type: Option<CableType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ribbon_size: Option<u32>,
}

impl CablePatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cable_type(mut self, cable_type: impl Into<CableType>) -> Self {
        self.cable_type = Some(cable_type.into());
        self
    }

    pub fn ribbon_size(mut self, ribbon_size: u32) -> Self {
        self.ribbon_size = Some(ribbon_size);
        self
    }
}
