use clap::ValueEnum;

use audit_core::identity::OrgContext;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub org: Option<String>,
    pub user: String,
    pub quiet: bool,
    pub verbose: bool,
    pub database: Option<String>,
}

impl GlobalFlags {
    /// The caller every command acts as. Without `--org` the caller is in the
    /// root organization.
    #[must_use]
    pub fn viewer(&self) -> OrgContext {
        match self.org.as_deref().map(str::trim) {
            Some(org) if !org.is_empty() => OrgContext::new(org, self.user.clone()),
            _ => OrgContext::root(self.user.clone()),
        }
    }
}
