use serde::Serialize;

use audit_core::entities::{CommandExecution, CommandExecutionHost, NewCommandExecution};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExecutionCommands;
use crate::commands::shared::input::read_payload;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RecordedExecution {
    execution: CommandExecution,
    hosts: Vec<CommandExecutionHost>,
}

/// Handle `auditctl command`.
pub async fn handle(
    action: &ExecutionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ExecutionCommands::List(list) => {
            let listing = ctx
                .api
                .list_command_executions(&ctx.viewer, &list.to_params())
                .await?;
            output(&listing, flags.format)
        }
        ExecutionCommands::Hosts(list) => {
            let listing = ctx
                .api
                .list_command_execution_hosts(&ctx.viewer, &list.to_params())
                .await?;
            output(&listing, flags.format)
        }
        ExecutionCommands::HostOptions => {
            output(&ctx.api.command_execution_host_options(), flags.format)
        }
        ExecutionCommands::Record(args) => {
            let new: NewCommandExecution = read_payload(args.json.as_deref(), "command execution")?;
            let (execution, hosts) = ctx.api.db().record_command_execution(new).await?;
            output(&RecordedExecution { execution, hosts }, flags.format)
        }
    }
}
