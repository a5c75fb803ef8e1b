use audit_core::entities::NewOperateLog;
use audit_core::query::QueryParams;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OperateCommands;
use crate::commands::shared::input::read_payload;
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditctl operate`.
pub async fn handle(
    action: &OperateCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OperateCommands::List { list, detail } => {
            let params = with_detail(list.to_params(), *detail);
            let listing = ctx.api.list_operate_logs(&ctx.viewer, &params).await?;
            output(&listing, flags.format)
        }
        OperateCommands::Get { id, detail } => {
            let params = with_detail(QueryParams::new(), *detail);
            let view = ctx.api.retrieve_operate_log(&ctx.viewer, id, &params).await?;
            output(&view, flags.format)
        }
        OperateCommands::Record(args) => {
            let new: NewOperateLog = read_payload(args.json.as_deref(), "operate log")?;
            let entry = ctx.api.record_operate_log(&ctx.viewer, new).await?;
            output(&entry, flags.format)
        }
    }
}

fn with_detail(params: QueryParams, detail: bool) -> QueryParams {
    if detail {
        params.with("type", "action_detail")
    } else {
        params
    }
}
