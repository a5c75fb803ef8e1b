//! Display-string configuration.

use std::collections::HashMap;

use audit_core::display::DisplayCatalog;
use serde::{Deserialize, Serialize};

/// Translation tables keyed by stored code.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// `resource_type` key → display text.
    #[serde(default)]
    pub resource_types: HashMap<String, String>,

    /// Authentication backend name → display text.
    #[serde(default)]
    pub backends: HashMap<String, String>,
}

impl DisplayConfig {
    /// Build the read-time lookup.
    pub fn catalog(&self) -> DisplayCatalog {
        DisplayCatalog::new(self.resource_types.clone(), self.backends.clone())
    }
}
