use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MemberCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MemberList<'a> {
    org_id: &'a str,
    members: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MemberChange<'a> {
    org_id: &'a str,
    username: &'a str,
    changed: bool,
}

/// Handle `auditctl member`.
pub async fn handle(
    action: &MemberCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = ctx.api.db();
    match action {
        MemberCommands::Add { org, username } => {
            db.add_org_member(org, username).await?;
            let change = MemberChange {
                org_id: org,
                username,
                changed: true,
            };
            output(&change, flags.format)
        }
        MemberCommands::Remove { org, username } => {
            let changed = db.remove_org_member(org, username).await?;
            if !changed {
                tracing::info!(org = %org, username = %username, "not a member, nothing removed");
            }
            let change = MemberChange {
                org_id: org,
                username,
                changed,
            };
            output(&change, flags.format)
        }
        MemberCommands::List { org } => {
            let members = db.list_org_members(org).await?;
            output(
                &MemberList {
                    org_id: org,
                    members,
                },
                flags.format,
            )
        }
    }
}
