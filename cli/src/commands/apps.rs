//! `okta app ...`

use super::{collect_pages, Context, PageArgs};
use crate::error::CliResult;
use clap::Subcommand;

/// Arguments for `okta app`.
#[derive(clap::Args, Debug, Clone)]
pub struct AppArgs {
    #[clap(subcommand)]
    pub command: AppCommand,
}

/// Application sub-commands.
#[derive(Subcommand, Debug, Clone)]
pub enum AppCommand {
    /// List app integrations.
    List {
        /// Match on name or label.
        #[clap(long)]
        q: Option<String>,
        /// Filter expression, e.g. `status eq "ACTIVE"`.
        #[clap(long)]
        filter: Option<String>,
        #[clap(flatten)]
        page: PageArgs,
    },
    /// Show one app.
    Get { id: String },
    /// Activate an inactive app.
    Activate { id: String },
    /// Deactivate an active app.
    Deactivate {
        id: String,
        /// Skip the confirmation prompt.
        #[clap(short, long)]
        yes: bool,
    },
    /// Delete an inactive app.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[clap(short, long)]
        yes: bool,
    },
}

/// Executes an application command.
pub fn execute(command: &AppCommand, ctx: &mut Context) -> CliResult<()> {
    let client = ctx.client;
    let api = client.application_api();

    match command {
        AppCommand::List { q, filter, page } => {
            let apps = collect_pages(page, |after| {
                let mut req = api.list_applications();
                if let Some(q) = q {
                    req = req.q(q);
                }
                if let Some(filter) = filter {
                    req = req.filter(filter);
                }
                if let Some(limit) = page.limit {
                    req = req.limit(limit);
                }
                if let Some(after) = after {
                    req = req.after(after);
                }
                req.execute()
            })?;
            ctx.io.print_json(&apps)
        }
        AppCommand::Get { id } => {
            let app = api.get_application(id).execute()?.data;
            ctx.io.print_json(&app)
        }
        AppCommand::Activate { id } => {
            api.activate_application(id).execute()?;
            ctx.print_done(id, "activated")
        }
        AppCommand::Deactivate { id, yes } => {
            if !ctx.confirm(*yes, &format!("Deactivate app {}?", id))? {
                return ctx.aborted();
            }
            api.deactivate_application(id).execute()?;
            ctx.print_done(id, "deactivated")
        }
        AppCommand::Delete { id, yes } => {
            if !ctx.confirm(*yes, &format!("Delete app {}?", id))? {
                return ctx.aborted();
            }
            api.delete_application(id).execute()?;
            ctx.print_done(id, "deleted")
        }
    }
}
