use audit_core::entities::NewLoginLog;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LoginCommands;
use crate::commands::shared::input::read_payload;
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditctl login`.
pub async fn handle(
    action: &LoginCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LoginCommands::List(list) => {
            let listing = ctx.api.list_login_logs(&ctx.viewer, &list.to_params()).await?;
            output(&listing, flags.format)
        }
        LoginCommands::Mine(list) => {
            let listing = ctx
                .api
                .list_my_login_logs(&ctx.viewer, &list.to_params())
                .await?;
            output(&listing, flags.format)
        }
        LoginCommands::Record(args) => {
            let new: NewLoginLog = read_payload(args.json.as_deref(), "login log")?;
            let entry = ctx.api.db().record_login(new).await?;
            output(&entry, flags.format)
        }
    }
}
