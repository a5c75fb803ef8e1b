use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A password change. Not owned by an organization; visibility follows the
/// subject user's memberships.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PasswordChangeLogEntry {
    pub id: String,
    /// Subject whose password was changed.
    pub user: String,
    pub change_by: String,
    pub remote_addr: Option<String>,
    pub datetime: DateTime<Utc>,
}

impl fmt::Display for PasswordChangeLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} change {}'s password", self.change_by, self.user)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewPasswordChangeLog {
    pub user: String,
    pub change_by: String,
    #[serde(default)]
    pub remote_addr: Option<String>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
}
