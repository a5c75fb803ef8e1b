use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `auditctl` binary.
#[derive(Debug, Parser)]
#[command(name = "auditctl", version, about = "Query and record audit logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Organization to act in (defaults to the root organization)
    #[arg(long, global = true)]
    pub org: Option<String>,

    /// Username to act as
    #[arg(long, global = true, default_value = "admin")]
    pub user: String,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path, overriding configuration
    #[arg(long, global = true)]
    pub database: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            org: self.org.clone(),
            user: self.user.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
            database: self.database.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{ExecutionCommands, LoginCommands, OperateCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from([
            "auditctl", "--format", "raw", "--org", "org-a", "login", "mine", "--verbose",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert_eq!(cli.org.as_deref(), Some("org-a"));
        assert!(matches!(
            cli.command,
            Commands::Login {
                action: LoginCommands::Mine(_)
            }
        ));
    }

    #[test]
    fn output_format_rejects_table() {
        let parsed = Cli::try_parse_from(["auditctl", "--format", "table", "member", "list", "org-a"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn viewer_defaults_to_root() {
        let cli = Cli::try_parse_from(["auditctl", "command", "host-options"]).expect("parse");
        let viewer = cli.global_flags().viewer();
        assert!(viewer.is_root());
        assert_eq!(viewer.username, "admin");
        assert!(matches!(
            cli.command,
            Commands::Command {
                action: ExecutionCommands::HostOptions
            }
        ));
    }

    #[test]
    fn viewer_uses_org_and_user() {
        let cli = Cli::try_parse_from([
            "auditctl", "--org", "org-b", "--user", "carol", "transfer", "list",
        ])
        .expect("parse");
        let viewer = cli.global_flags().viewer();
        assert_eq!(viewer.org_id, "org-b");
        assert_eq!(viewer.username, "carol");
    }

    #[test]
    fn operate_list_collects_filters() {
        let cli = Cli::try_parse_from([
            "auditctl",
            "operate",
            "list",
            "--filter",
            "action=create",
            "--filter",
            "user=alice",
            "--keyword",
            "web",
            "--date-from",
            "2026-03-01",
            "--date-to",
            "2026-03-05",
            "--limit",
            "5",
            "--detail",
        ])
        .expect("parse");
        let Commands::Operate {
            action: OperateCommands::List { list, detail },
        } = cli.command
        else {
            panic!("expected operate list");
        };
        assert!(detail);
        let params = list.to_params();
        assert_eq!(params.get("action"), Some("create"));
        assert_eq!(params.get("user"), Some("alice"));
        assert_eq!(params.get("keyword"), Some("web"));
        assert_eq!(params.get("date_from"), Some("2026-03-01"));
        assert_eq!(params.get("limit"), Some("5"));
        assert_eq!(params.get("offset"), None);
    }

    #[test]
    fn malformed_filter_is_rejected() {
        let parsed = Cli::try_parse_from(["auditctl", "transfer", "list", "--filter", "nokey"]);
        assert!(parsed.is_err());
    }
}
