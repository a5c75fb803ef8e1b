use clap::Subcommand;

/// Organization membership commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// Add a user to an organization.
    Add { org: String, username: String },
    /// Remove a user from an organization.
    Remove { org: String, username: String },
    /// List an organization's members.
    List { org: String },
}
