use audit_core::entities::NewPasswordChangeLog;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PasswordCommands;
use crate::commands::shared::input::read_payload;
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditctl password`.
pub async fn handle(
    action: &PasswordCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PasswordCommands::List(list) => {
            let listing = ctx
                .api
                .list_password_change_logs(&ctx.viewer, &list.to_params())
                .await?;
            output(&listing, flags.format)
        }
        PasswordCommands::Record(args) => {
            let new: NewPasswordChangeLog =
                read_payload(args.json.as_deref(), "password change log")?;
            let entry = ctx.api.db().record_password_change(new).await?;
            output(&entry, flags.format)
        }
    }
}
