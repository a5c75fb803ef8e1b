//! Choice enums and record kinds for the audit store.
//!
//! Each choice enum knows the code it is stored under (`as_str` / `code`)
//! and the human label shown in list views (`label`). Storage codes match
//! the values accepted by the query surface, so `type=W` or `action=view`
//! filter on exactly what is persisted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TransferOperation
// ---------------------------------------------------------------------------

/// File operation recorded by a transfer (FTP/SFTP) log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TransferOperation {
    Delete,
    Upload,
    Download,
    Rmdir,
    Rename,
    Mkdir,
    Symlink,
}

impl TransferOperation {
    pub const ALL: [Self; 7] = [
        Self::Delete,
        Self::Upload,
        Self::Download,
        Self::Rmdir,
        Self::Rename,
        Self::Mkdir,
        Self::Symlink,
    ];

    /// Return the string representation used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Upload => "Upload",
            Self::Download => "Download",
            Self::Rmdir => "Rmdir",
            Self::Rename => "Rename",
            Self::Mkdir => "Mkdir",
            Self::Symlink => "Symlink",
        }
    }

    /// Display label. Transfer operations are labelled by their code.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for TransferOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OperateAction
// ---------------------------------------------------------------------------

/// CRUD action recorded by an operate log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OperateAction {
    Create,
    View,
    Update,
    Delete,
}

impl OperateAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::View => "view",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::View => "View",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for OperateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LoginChannel
// ---------------------------------------------------------------------------

/// Channel through which a login attempt was made.
///
/// Stored as a one-letter code: `W`, `T`, `U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum LoginChannel {
    #[serde(rename = "W")]
    Web,
    #[serde(rename = "T")]
    Terminal,
    #[serde(rename = "U")]
    Unknown,
}

impl LoginChannel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "W",
            Self::Terminal => "T",
            Self::Unknown => "U",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::Terminal => "Terminal",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LoginChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MfaStatus
// ---------------------------------------------------------------------------

/// MFA state of the account at login time.
///
/// Stored as a small integer (`0` disabled, `1` enabled, `2` unknown), which
/// is also the value the `mfa` filter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MfaStatus {
    Disabled,
    Enabled,
    #[default]
    Unknown,
}

impl MfaStatus {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Disabled => 0,
            Self::Enabled => 1,
            Self::Unknown => 2,
        }
    }

    /// Map a stored code back to a status. Unrecognized codes read as `Unknown`.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Disabled,
            1 => Self::Enabled,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Enabled => "Enabled",
            Self::Unknown => "-",
        }
    }
}

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Every record kind the query engine can target.
///
/// The four audit log kinds plus the command-execution listing and its
/// read-only host relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Transfer,
    Operate,
    PasswordChange,
    Login,
    CommandExecution,
    CommandExecutionHost,
}

impl RecordKind {
    pub const ALL: [Self; 6] = [
        Self::Transfer,
        Self::Operate,
        Self::PasswordChange,
        Self::Login,
        Self::CommandExecution,
        Self::CommandExecutionHost,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Operate => "operate",
            Self::PasswordChange => "password_change",
            Self::Login => "login",
            Self::CommandExecution => "command_execution",
            Self::CommandExecutionHost => "command_execution_host",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transfer => "File transfer log",
            Self::Operate => "Operate log",
            Self::PasswordChange => "Password change log",
            Self::Login => "User login log",
            Self::CommandExecution => "Command execution",
            Self::CommandExecutionHost => "Command execution host",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown record kind '{s}'")))
    }
}
