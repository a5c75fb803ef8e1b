use clap::Subcommand;

use super::{ListArgs, RecordArgs};

/// Command execution commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ExecutionCommands {
    /// List command executions.
    List(ListArgs),
    /// List execution targets. Filter with `--filter command_execution=<id>`.
    Hosts(ListArgs),
    /// Describe the execution target listing.
    HostOptions,
    /// Record an execution with its target hosts.
    Record(RecordArgs),
}
