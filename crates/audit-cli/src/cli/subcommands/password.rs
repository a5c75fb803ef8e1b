use clap::Subcommand;

use super::{ListArgs, RecordArgs};

/// Password change log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PasswordCommands {
    List(ListArgs),
    Record(RecordArgs),
}
