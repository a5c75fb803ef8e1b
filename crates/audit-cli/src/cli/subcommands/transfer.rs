use clap::Subcommand;

use super::{ListArgs, RecordArgs};

/// Transfer log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TransferCommands {
    /// List transfer logs, newest first.
    List(ListArgs),
    /// Record a transfer in the caller's organization.
    Record(RecordArgs),
}
