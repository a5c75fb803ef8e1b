use clap::Subcommand;

use super::{ListArgs, RecordArgs};

/// Operate log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OperateCommands {
    /// List operate logs, newest first.
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Include before/after payloads.
        #[arg(long)]
        detail: bool,
    },
    /// Get an operate log by ID.
    Get {
        id: String,
        /// Include before/after payloads.
        #[arg(long)]
        detail: bool,
    },
    /// Record an operation.
    Record(RecordArgs),
}
