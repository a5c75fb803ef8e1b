//! General listing configuration.

use serde::{Deserialize, Serialize};

/// Default page size.
const fn default_limit() -> u32 {
    20
}

/// Upper bound on a requested page size.
const fn default_max_limit() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size when a listing does not ask for one.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Largest page size a listing may ask for.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl GeneralConfig {
    /// Resolve a requested page size against the defaults and the cap.
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|limit| *limit > 0)
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}
