use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{LoginChannel, MfaStatus};

/// A login attempt, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserLoginLogEntry {
    pub id: String,
    pub username: String,
    #[serde(rename = "type")]
    pub login_type: LoginChannel,
    pub ip: String,
    pub city: Option<String>,
    pub user_agent: Option<String>,
    pub mfa: MfaStatus,
    /// Failure reason code; empty on success.
    pub reason: String,
    pub status: bool,
    pub datetime: DateTime<Utc>,
    /// Name of the authentication backend that handled the attempt.
    pub backend: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewLoginLog {
    pub username: String,
    #[serde(rename = "type")]
    pub login_type: LoginChannel,
    pub ip: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub mfa: MfaStatus,
    #[serde(default)]
    pub reason: String,
    pub status: bool,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub backend: String,
}
