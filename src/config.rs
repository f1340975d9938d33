use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mode::RibbonDefaults;

/// Default number of saves kept per partition.
pub const DEFAULT_SAVE_RETENTION: usize = 50;

/// Configuration for [`SpliceService`](crate::SpliceService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// Saves kept per partition; older ones are evicted on create.
    pub save_retention: usize,
    /// Ribbon/binder size given to cables created without one.
    pub ribbon_defaults: RibbonDefaults,
    /// Directory holding the per-mode store files. Required by
    /// [`SpliceService::open`](crate::SpliceService::open).
    pub data_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            save_retention: DEFAULT_SAVE_RETENTION,
            ribbon_defaults: RibbonDefaults::default(),
            data_dir: None,
        }
    }
}

impl ServiceConfig {
    pub fn with_save_retention(mut self, save_retention: usize) -> Self {
        self.save_retention = save_retention;
        self
    }

    pub fn with_ribbon_defaults(mut self, ribbon_defaults: RibbonDefaults) -> Self {
        self.ribbon_defaults = ribbon_defaults;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }
}
