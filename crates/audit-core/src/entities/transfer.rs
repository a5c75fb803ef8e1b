use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TransferOperation;

/// A file transfer performed through a bastion session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TransferLogEntry {
    pub id: String,
    pub org_id: String,
    pub user: String,
    pub remote_addr: Option<String>,
    pub asset: String,
    /// Account on the target asset the transfer ran as.
    pub account: String,
    pub operate: TransferOperation,
    pub filename: String,
    pub is_success: bool,
    pub date_start: DateTime<Utc>,
}

/// Input for recording a transfer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTransferLog {
    pub user: String,
    #[serde(default)]
    pub remote_addr: Option<String>,
    pub asset: String,
    pub account: String,
    pub operate: TransferOperation,
    pub filename: String,
    #[serde(default = "default_success")]
    pub is_success: bool,
    /// Historical start time for imports. Defaults to the insertion time.
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
}

const fn default_success() -> bool {
    true
}
