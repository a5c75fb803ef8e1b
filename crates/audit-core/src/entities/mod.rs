//! Entity structs for every audit record kind.
//!
//! Each entity maps to a table in the libSQL store and, for operate logs, to a
//! document in the optional search index. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`. Records are immutable once written; the
//! `New*` structs are the only way to describe a record that does not exist yet.

mod command;
mod login;
mod operate;
mod password_change;
mod transfer;

pub use command::{CommandExecution, CommandExecutionHost, NewCommandExecution, NewExecutionHost};
pub use login::{NewLoginLog, UserLoginLogEntry};
pub use operate::{NewOperateLog, OperateLogEntry, empty_payload};
pub use password_change::{NewPasswordChangeLog, PasswordChangeLogEntry};
pub use transfer::{NewTransferLog, TransferLogEntry};

/// Optional text as stored: an empty string is recorded as absent.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
