#![deny(missing_docs)]

//! # Okta CLI
//!
//! Command line for the Okta Admin Management API.
//!
//! Supported Commands:
//! - `gen`: Scaffolds clap command modules from an OpenAPI document.
//! - `user`, `group`, `app`: Resource commands over the typed SDK.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::commands::{apps, groups, users, Context};
use crate::config::{load_file_config, ConnectionArgs};
use crate::error::CliResult;
use crate::iostreams::IoStreams;
use okta_sdk::ApiClient;

mod commands;
mod config;
mod error;
mod gen;
mod iostreams;
mod logging;
mod prompt;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Okta Admin Management CLI")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[clap(long, global = true)]
    log_json: bool,

    #[clap(flatten)]
    connection: ConnectionArgs,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate command modules from an OpenAPI document.
    Gen(gen::GenArgs),
    /// Manage users.
    User(users::UserArgs),
    /// Manage groups and memberships.
    Group(groups::GroupArgs),
    /// Manage app integrations.
    App(apps::AppArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_json);

    let mut io = IoStreams::system();
    match run(&cli, &mut io) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let _ = io.eprintln(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, io: &mut IoStreams) -> CliResult<()> {
    if let Commands::Gen(args) = &cli.command {
        return gen::execute(args, io);
    }

    // 1. Resolve connection settings
    let file = load_file_config(cli.connection.config.as_deref())?;
    let config = cli.connection.resolve(file)?;
    tracing::debug!(org = %config.org_url, "resolved connection");

    // 2. Build client and prompter
    let client = ApiClient::new(config);
    let prompter = prompt::for_session(io.is_tty);
    let mut ctx = Context {
        client: &client,
        io,
        prompter: prompter.as_ref(),
    };

    // 3. Dispatch
    match &cli.command {
        Commands::User(args) => users::execute(&args.command, &mut ctx),
        Commands::Group(args) => groups::execute(&args.command, &mut ctx),
        Commands::App(args) => apps::execute(&args.command, &mut ctx),
        Commands::Gen(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "okta",
            "user",
            "list",
            "--org-url",
            "https://dev-1.okta.com",
            "-vv",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.connection.org_url.as_deref(), Some("https://dev-1.okta.com"));
        match cli.command {
            Commands::User(args) => match args.command {
                users::UserCommand::List(list) => assert!(list.page.all),
                other => panic!("unexpected command {:?}", other),
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_gen_tags() {
        let cli = Cli::try_parse_from([
            "okta", "gen", "--openapi-path", "api.yaml", "--tag", "User", "--tag", "Group",
        ])
        .unwrap();

        match cli.command {
            Commands::Gen(args) => assert_eq!(args.tags, vec!["User", "Group"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_group_add_user_takes_two_ids() {
        assert!(Cli::try_parse_from(["okta", "group", "add-user", "00g1"]).is_err());
        assert!(Cli::try_parse_from(["okta", "group", "add-user", "00g1", "00u1"]).is_ok());
    }
}
