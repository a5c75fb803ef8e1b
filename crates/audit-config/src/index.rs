//! Search-index configuration for the operate-log kind.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_index() -> String {
    String::from("audit-operate-log")
}

/// Liveness probe budget in seconds.
const fn default_ping_timeout_secs() -> u64 {
    2
}

const fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Cluster base URL (e.g., `http://es.internal:9200`). Empty disables the index.
    #[serde(default)]
    pub url: String,

    /// Index name, or prefix when `index_by_date` is set.
    #[serde(default = "default_index")]
    pub index: String,

    /// Write into one index per day (`{index}-YYYY-MM-DD`) and search `{index}-*`.
    #[serde(default)]
    pub index_by_date: bool,

    /// Basic-auth username.
    #[serde(default)]
    pub username: String,

    /// Basic-auth password.
    #[serde(default)]
    pub password: String,

    /// Upper bound on the liveness probe, in seconds.
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,

    /// Timeout for search and write requests, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            index: default_index(),
            index_by_date: false,
            username: String::new(),
            password: String::new(),
            ping_timeout_secs: default_ping_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl IndexConfig {
    /// Whether operate logs should try the index at all.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Whether requests should carry basic-auth credentials.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    pub const fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Index name (or pattern) that searches run against.
    pub fn search_target(&self) -> String {
        if self.index_by_date {
            format!("{}-*", self.index)
        } else {
            self.index.clone()
        }
    }

    /// Index a document dated `day` (`YYYY-MM-DD`) is written into.
    pub fn write_target(&self, day: &str) -> String {
        if self.index_by_date {
            format!("{}-{day}", self.index)
        } else {
            self.index.clone()
        }
    }
}
