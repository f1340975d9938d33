//! Partition modes and the per-mode defaults applied at creation time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two isolated data domains. Callers that don't care get `Fiber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Fiber,
    Copper,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fiber => "fiber",
            Mode::Copper => "copper",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode '{}' (expected 'fiber' or 'copper')", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fiber" => Ok(Mode::Fiber),
            "copper" => Ok(Mode::Copper),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Ribbon (fiber) or binder (copper) size used when a cable is created
/// without an explicit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RibbonDefaults {
    pub fiber: u32,
    pub copper: u32,
}

impl Default for RibbonDefaults {
    fn default() -> Self {
        Self {
            fiber: 12,
            copper: 25,
        }
    }
}

impl RibbonDefaults {
    pub fn for_mode(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Fiber => self.fiber,
            Mode::Copper => self.copper,
        }
    }
}
