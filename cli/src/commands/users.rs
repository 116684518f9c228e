//! `okta user ...`

use super::{collect_pages, Context, PageArgs};
use crate::error::CliResult;
use clap::Subcommand;
use okta_sdk::models::{
    CreateUserRequest, PasswordCredential, UserCredentials, UserProfile, UserStatus,
};

/// Arguments for `okta user`.
#[derive(clap::Args, Debug, Clone)]
pub struct UserArgs {
    #[clap(subcommand)]
    pub command: UserCommand,
}

/// User sub-commands.
#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// List users.
    List(ListUsersArgs),
    /// Show one user.
    Get {
        /// User id or login.
        id: String,
    },
    /// Create a user.
    Create(CreateUserArgs),
    /// Activate a staged or deprovisioned user.
    Activate {
        id: String,
        /// Email the activation link to the user. Okta emails by default.
        #[clap(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        send_email: Option<bool>,
    },
    /// Deactivate a user.
    Deactivate {
        id: String,
        /// Email admins about the deactivation.
        #[clap(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        send_email: Option<bool>,
        /// Skip the confirmation prompt.
        #[clap(short, long)]
        yes: bool,
    },
    /// Delete a user. An active user is deactivated first.
    Delete {
        id: String,
        /// Email admins about the deactivation.
        #[clap(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        send_email: Option<bool>,
        /// Skip the confirmation prompt.
        #[clap(short, long)]
        yes: bool,
    },
    /// List the groups a user belongs to.
    Groups { id: String },
}

/// Filters for `okta user list`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListUsersArgs {
    /// Prefix match on first name, last name or email.
    #[clap(long)]
    pub q: Option<String>,

    /// Filter expression, e.g. `status eq "ACTIVE"`.
    #[clap(long)]
    pub filter: Option<String>,

    /// Search expression.
    #[clap(long)]
    pub search: Option<String>,

    #[clap(long)]
    pub sort_by: Option<String>,

    #[clap(long, value_parser = ["asc", "desc"])]
    pub sort_order: Option<String>,

    #[clap(flatten)]
    pub page: PageArgs,
}

/// Profile and options for `okta user create`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CreateUserArgs {
    /// Sign-in name, usually an email address.
    #[clap(long)]
    pub login: Option<String>,

    /// Primary email. Defaults to the login.
    #[clap(long)]
    pub email: Option<String>,

    #[clap(long)]
    pub first_name: Option<String>,

    #[clap(long)]
    pub last_name: Option<String>,

    /// Initial password. Without one the user activates by email.
    #[clap(long, env = "OKTA_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Activate on creation.
    #[clap(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub activate: bool,

    /// Require a password change at first sign-in.
    #[clap(long)]
    pub change_password: bool,

    /// Add the user to this group (repeatable).
    #[clap(long = "group-id")]
    pub group_ids: Vec<String>,
}

/// Executes a user command.
pub fn execute(command: &UserCommand, ctx: &mut Context) -> CliResult<()> {
    let client = ctx.client;
    let api = client.user_api();

    match command {
        UserCommand::List(args) => {
            let users = collect_pages(&args.page, |after| {
                let mut req = api.list_users();
                if let Some(q) = &args.q {
                    req = req.q(q);
                }
                if let Some(filter) = &args.filter {
                    req = req.filter(filter);
                }
                if let Some(search) = &args.search {
                    req = req.search(search);
                }
                if let Some(sort_by) = &args.sort_by {
                    req = req.sort_by(sort_by);
                }
                if let Some(sort_order) = &args.sort_order {
                    req = req.sort_order(sort_order);
                }
                if let Some(limit) = args.page.limit {
                    req = req.limit(limit);
                }
                if let Some(after) = after {
                    req = req.after(after);
                }
                req.execute()
            })?;
            ctx.io.print_json(&users)
        }
        UserCommand::Get { id } => {
            let user = api.get_user(id).execute()?.data;
            ctx.io.print_json(&user)
        }
        UserCommand::Create(args) => {
            let body = build_create_request(args, ctx)?;
            let mut req = api.create_user(body).activate(args.activate);
            if args.change_password {
                req = req.next_login("changePassword");
            }
            let user = req.execute()?.data;
            tracing::info!(id = ?user.id, "created user");
            ctx.io.print_json(&user)
        }
        UserCommand::Activate { id, send_email } => {
            let mut req = api.activate_user(id);
            if let Some(send_email) = send_email {
                req = req.send_email(*send_email);
            }
            let token = req.execute()?.data;
            ctx.io.print_json(&token)
        }
        UserCommand::Deactivate { id, send_email, yes } => {
            if !ctx.confirm(*yes, &format!("Deactivate user {}?", id))? {
                return ctx.aborted();
            }
            let mut req = api.deactivate_user(id);
            if let Some(send_email) = send_email {
                req = req.send_email(*send_email);
            }
            req.execute()?;
            ctx.print_done(id, "deactivated")
        }
        UserCommand::Delete { id, send_email, yes } => {
            if !ctx.confirm(*yes, &format!("Delete user {}?", id))? {
                return ctx.aborted();
            }
            // The first DELETE on a user that is not deprovisioned only deactivates it.
            let status = api.get_user(id).execute()?.data.status;
            let passes = if status == Some(UserStatus::Deprovisioned) { 1 } else { 2 };
            for _ in 0..passes {
                let mut req = api.delete_user(id);
                if let Some(send_email) = send_email {
                    req = req.send_email(*send_email);
                }
                req.execute()?;
            }
            tracing::info!(id = %id, passes, "deleted user");
            ctx.print_done(id, "deleted")
        }
        UserCommand::Groups { id } => {
            let groups = api.list_user_groups(id).execute()?.data;
            ctx.io.print_json(&groups)
        }
    }
}

/// Fills profile fields from flags, prompting for the missing required ones.
fn build_create_request(args: &CreateUserArgs, ctx: &Context) -> CliResult<CreateUserRequest> {
    let ask = |value: &Option<String>, label: &str| -> CliResult<String> {
        match value {
            Some(v) => Ok(v.clone()),
            None => ctx.prompter.input(label, None),
        }
    };

    let login = ask(&args.login, "Login (--login)")?;
    let first_name = ask(&args.first_name, "First name (--first-name)")?;
    let last_name = ask(&args.last_name, "Last name (--last-name)")?;
    let email = args.email.clone().unwrap_or_else(|| login.clone());

    let password = match &args.password {
        Some(p) => Some(p.clone()),
        None if ctx.io.is_tty => {
            Some(ctx.prompter.password("Password (empty to activate by email)")?)
                .filter(|p| !p.is_empty())
        }
        None => None,
    };
    let credentials = password.map(|password| UserCredentials {
        password: Some(PasswordCredential {
            value: Some(password),
            ..Default::default()
        }),
        ..Default::default()
    });

    Ok(CreateUserRequest {
        profile: UserProfile {
            login: Some(login),
            email: Some(email),
            first_name: Some(first_name),
            last_name: Some(last_name),
            ..Default::default()
        },
        credentials,
        group_ids: args.group_ids.clone(),
        ..Default::default()
    })
}
