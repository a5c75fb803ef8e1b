use schemars::schema_for;

use audit_core::entities::{
    CommandExecution, CommandExecutionHost, NewCommandExecution, NewLoginLog, NewOperateLog,
    NewPasswordChangeLog, NewTransferLog, OperateLogEntry, PasswordChangeLogEntry,
    TransferLogEntry, UserLoginLogEntry,
};
use audit_core::enums::RecordKind;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `auditctl schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kind: RecordKind = args.kind.parse()?;
    output(&schema(kind, args.input)?, flags.format)
}

fn schema(kind: RecordKind, input: bool) -> anyhow::Result<schemars::Schema> {
    let schema = match (kind, input) {
        (RecordKind::Transfer, false) => schema_for!(TransferLogEntry),
        (RecordKind::Transfer, true) => schema_for!(NewTransferLog),
        (RecordKind::Operate, false) => schema_for!(OperateLogEntry),
        (RecordKind::Operate, true) => schema_for!(NewOperateLog),
        (RecordKind::PasswordChange, false) => schema_for!(PasswordChangeLogEntry),
        (RecordKind::PasswordChange, true) => schema_for!(NewPasswordChangeLog),
        (RecordKind::Login, false) => schema_for!(UserLoginLogEntry),
        (RecordKind::Login, true) => schema_for!(NewLoginLog),
        (RecordKind::CommandExecution, false) => schema_for!(CommandExecution),
        (RecordKind::CommandExecution, true) => schema_for!(NewCommandExecution),
        (RecordKind::CommandExecutionHost, false) => schema_for!(CommandExecutionHost),
        (RecordKind::CommandExecutionHost, true) => {
            anyhow::bail!("command execution hosts are recorded with their command execution")
        }
    };
    Ok(schema)
}
