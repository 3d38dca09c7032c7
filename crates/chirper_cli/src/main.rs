//! Command-line entry point for chirper.
//!
//! # Responsibility
//! - Wire configuration, logging and storage around `ChirpHandler`.
//! - Print handler responses the way an HTTP client would observe them.

use chirper_core::db::open_db;
use chirper_core::{
    init_logging, ChirpForm, ChirpHandler, ChirperConfig, ConfigOverrides, Requester, Response,
    Route, SqliteChirpRepository, SqliteUserRepository, User, UserRepository,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "chirper")]
#[command(version)]
#[command(about = "Post and edit short messages", long_about = None)]
struct Cli {
    /// SQLite database file (env: CHIRPER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (env: CHIRPER_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for log files (env: CHIRPER_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check core linkage
    Ping,

    #[command(flatten)]
    Store(StoreCommands),
}

/// Commands that need configuration, logging and the database.
#[derive(Subcommand)]
enum StoreCommands {
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Post a chirp
    Post {
        /// Acting user id
        #[arg(long = "as")]
        as_user: Option<Uuid>,

        message: String,
    },

    /// Edit a chirp you authored
    Edit {
        /// Acting user id
        #[arg(long = "as")]
        as_user: Option<Uuid>,

        chirp: Uuid,

        message: String,
    },

    /// List every chirp, oldest first
    List {
        /// Acting user id
        #[arg(long = "as")]
        as_user: Option<Uuid>,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a user and print its id
    Add { name: String, email: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let command = match cli.command {
        Commands::Ping => {
            println!("chirper_core ping={}", chirper_core::ping());
            println!("chirper_core version={}", chirper_core::core_version());
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Store(command) => command,
    };

    let config = ChirperConfig::load(ConfigOverrides {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    })?;
    init_logging(&config.log_level, &config.log_dir)?;
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;

    let response = match command {
        StoreCommands::User {
            command: UserCommands::Add { name, email },
        } => {
            let users = SqliteUserRepository::try_new(&conn)?;
            let id = users.create_user(&User::new(name, email))?;
            println!("{id}");
            return Ok(ExitCode::SUCCESS);
        }
        StoreCommands::Post { as_user, message } => {
            let handler = ChirpHandler::new(SqliteChirpRepository::try_new(&conn)?);
            handler.store(Requester::from_session(as_user), &ChirpForm::new(message))
        }
        StoreCommands::Edit {
            as_user,
            chirp,
            message,
        } => {
            let handler = ChirpHandler::new(SqliteChirpRepository::try_new(&conn)?);
            handler.update(
                Requester::from_session(as_user),
                chirp,
                &ChirpForm::new(message),
            )
        }
        StoreCommands::List { as_user } => {
            let handler = ChirpHandler::new(SqliteChirpRepository::try_new(&conn)?);
            handler.index(Requester::from_session(as_user))
        }
    };

    print_response(&response)?;
    Ok(if succeeded(&response) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// A login redirect means the command ran without an acting user.
fn succeeded(response: &Response) -> bool {
    response.status() < 400 && !response.is_redirect_to(Route::Login)
}

fn print_response(response: &Response) -> serde_json::Result<()> {
    println!("status={}", response.status());
    match response {
        Response::View { component, props } => {
            println!("component={component}");
            println!("{}", serde_json::to_string_pretty(props)?);
        }
        Response::Redirect(route) => println!("location={} route={}", route.url(), route.name()),
        Response::ValidationFailed(errors) => {
            println!("{}", serde_json::to_string_pretty(errors)?);
        }
        Response::Forbidden => println!("forbidden"),
        Response::NotFound => println!("not found"),
        Response::ServerError => println!("server error"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{succeeded, Cli, Commands, StoreCommands};
    use chirper_core::{Response, Route};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_edit_with_acting_user() {
        let user = uuid::Uuid::new_v4();
        let chirp = uuid::Uuid::new_v4();
        let (user_arg, chirp_arg) = (user.to_string(), chirp.to_string());
        let cli = Cli::try_parse_from([
            "chirper",
            "edit",
            "--as",
            user_arg.as_str(),
            chirp_arg.as_str(),
            "new text",
        ])
        .unwrap();
        match cli.command {
            Commands::Store(StoreCommands::Edit {
                as_user,
                chirp: parsed,
                message,
            }) => {
                assert_eq!(as_user, Some(user));
                assert_eq!(parsed, chirp);
                assert_eq!(message, "new text");
            }
            _ => panic!("expected edit command"),
        }
    }

    #[test]
    fn ping_parses_as_top_level_command() {
        let cli = Cli::try_parse_from(["chirper", "ping"]).unwrap();
        assert!(matches!(cli.command, Commands::Ping));
    }

    #[test]
    fn guest_login_redirect_counts_as_failure() {
        assert!(!succeeded(&Response::Redirect(Route::Login)));
        assert!(!succeeded(&Response::Forbidden));
        assert!(succeeded(&Response::Redirect(Route::ChirpsIndex)));
    }
}
