use clap::{Args, Subcommand};

use super::subcommands::{
    ExecutionCommands, LoginCommands, MemberCommands, OperateCommands, PasswordCommands,
    TransferCommands,
};

/// Root command set for `auditctl`.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// File transfer logs.
    Transfer {
        #[command(subcommand)]
        action: TransferCommands,
    },
    /// Resource operation logs.
    Operate {
        #[command(subcommand)]
        action: OperateCommands,
    },
    /// Password change logs.
    Password {
        #[command(subcommand)]
        action: PasswordCommands,
    },
    /// Login attempts.
    Login {
        #[command(subcommand)]
        action: LoginCommands,
    },
    /// Remote command executions.
    Command {
        #[command(subcommand)]
        action: ExecutionCommands,
    },
    /// Organization membership.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Dump the JSON schema of a record kind.
    Schema(SchemaArgs),
}

/// Arguments for `auditctl schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record kind, e.g. `operate` or `command_execution`.
    pub kind: String,

    /// Print the schema of the write payload instead of the stored entry.
    #[arg(long)]
    pub input: bool,
}
