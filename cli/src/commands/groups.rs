//! `okta group ...`

use super::{collect_pages, Context, PageArgs};
use crate::error::CliResult;
use clap::Subcommand;
use okta_sdk::models::Group;

/// Arguments for `okta group`.
#[derive(clap::Args, Debug, Clone)]
pub struct GroupArgs {
    #[clap(subcommand)]
    pub command: GroupCommand,
}

/// Group sub-commands.
#[derive(Subcommand, Debug, Clone)]
pub enum GroupCommand {
    /// List groups.
    List(ListGroupsArgs),
    /// Show one group.
    Get { id: String },
    /// Create an Okta group.
    Create {
        #[clap(long)]
        name: String,
        #[clap(long)]
        description: Option<String>,
    },
    /// Delete a group.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[clap(short, long)]
        yes: bool,
    },
    /// List the members of a group.
    Members {
        id: String,
        #[clap(flatten)]
        page: PageArgs,
    },
    /// Add a user to a group.
    AddUser { group_id: String, user_id: String },
    /// Remove a user from a group.
    RemoveUser {
        group_id: String,
        user_id: String,
        /// Skip the confirmation prompt.
        #[clap(short, long)]
        yes: bool,
    },
}

/// Filters for `okta group list`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListGroupsArgs {
    /// Prefix match on the group name.
    #[clap(long)]
    pub q: Option<String>,

    #[clap(long)]
    pub filter: Option<String>,

    #[clap(long)]
    pub search: Option<String>,

    #[clap(flatten)]
    pub page: PageArgs,
}

/// Executes a group command.
pub fn execute(command: &GroupCommand, ctx: &mut Context) -> CliResult<()> {
    let client = ctx.client;
    let api = client.group_api();

    match command {
        GroupCommand::List(args) => {
            let groups = collect_pages(&args.page, |after| {
                let mut req = api.list_groups();
                if let Some(q) = &args.q {
                    req = req.q(q);
                }
                if let Some(filter) = &args.filter {
                    req = req.filter(filter);
                }
                if let Some(search) = &args.search {
                    req = req.search(search);
                }
                if let Some(limit) = args.page.limit {
                    req = req.limit(limit);
                }
                if let Some(after) = after {
                    req = req.after(after);
                }
                req.execute()
            })?;
            ctx.io.print_json(&groups)
        }
        GroupCommand::Get { id } => {
            let group = api.get_group(id).execute()?.data;
            ctx.io.print_json(&group)
        }
        GroupCommand::Create { name, description } => {
            let group = api
                .add_group(Group::named(name.as_str(), description.clone()))
                .execute()?
                .data;
            tracing::info!(id = ?group.id, "created group");
            ctx.io.print_json(&group)
        }
        GroupCommand::Delete { id, yes } => {
            if !ctx.confirm(*yes, &format!("Delete group {}?", id))? {
                return ctx.aborted();
            }
            api.delete_group(id).execute()?;
            ctx.print_done(id, "deleted")
        }
        GroupCommand::Members { id, page } => {
            let users = collect_pages(page, |after| {
                let mut req = api.list_group_users(id);
                if let Some(limit) = page.limit {
                    req = req.limit(limit);
                }
                if let Some(after) = after {
                    req = req.after(after);
                }
                req.execute()
            })?;
            ctx.io.print_json(&users)
        }
        GroupCommand::AddUser { group_id, user_id } => {
            api.assign_user_to_group(group_id, user_id).execute()?;
            ctx.print_done(user_id, &format!("added to {}", group_id))
        }
        GroupCommand::RemoveUser {
            group_id,
            user_id,
            yes,
        } => {
            if !ctx.confirm(*yes, &format!("Remove user {} from group {}?", user_id, group_id))? {
                return ctx.aborted();
            }
            api.unassign_user_from_group(group_id, user_id).execute()?;
            ctx.print_done(user_id, &format!("removed from {}", group_id))
        }
    }
}
