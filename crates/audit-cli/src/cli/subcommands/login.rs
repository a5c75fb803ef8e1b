use clap::Subcommand;

use super::{ListArgs, RecordArgs};

/// Login log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LoginCommands {
    /// Login attempts of the caller's organization members.
    List(ListArgs),
    /// The caller's own login attempts.
    Mine(ListArgs),
    /// Record a login attempt.
    Record(RecordArgs),
}
