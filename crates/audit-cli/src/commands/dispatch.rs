use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Transfer { action } => commands::transfer::handle(&action, ctx, flags).await,
        Commands::Operate { action } => commands::operate::handle(&action, ctx, flags).await,
        Commands::Password { action } => commands::password::handle(&action, ctx, flags).await,
        Commands::Login { action } => commands::login::handle(&action, ctx, flags).await,
        Commands::Command { action } => commands::execution::handle(&action, ctx, flags).await,
        Commands::Member { action } => commands::member::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
