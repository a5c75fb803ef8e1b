use audit_core::entities::NewTransferLog;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TransferCommands;
use crate::commands::shared::input::read_payload;
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditctl transfer`.
pub async fn handle(
    action: &TransferCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TransferCommands::List(list) => {
            let listing = ctx
                .api
                .list_transfer_logs(&ctx.viewer, &list.to_params())
                .await?;
            output(&listing, flags.format)
        }
        TransferCommands::Record(args) => {
            let new: NewTransferLog = read_payload(args.json.as_deref(), "transfer log")?;
            let created = ctx.api.create_transfer_log(&ctx.viewer, new).await?;
            output(&created, flags.format)
        }
    }
}
