//! CompareBuddy CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! cb-cli migrate
//!
//! # Load the sample catalog
//! cb-cli seed --file crates/api/fixtures/catalog.sql
//!
//! # Create a password user
//! cb-cli user create -u alice -p 's3cret!'
//! ```
//!
//! Every command reads `API_DATABASE_URL` (or `DATABASE_URL`) from the
//! environment or a `.env` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "CompareBuddy CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Load catalog data from a SQL file
    Seed {
        /// SQL file to execute
        #[arg(short, long, default_value = commands::seed::DEFAULT_SEED_FILE)]
        file: PathBuf,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Debug, Subcommand)]
enum UserAction {
    /// Create a new password user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Display name (defaults to the username)
        #[arg(short = 'n', long)]
        display_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { file } => commands::seed::catalog(&file).await,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                password,
                email,
                display_name,
            } => {
                commands::user::create(
                    &username,
                    &password,
                    email.as_deref(),
                    display_name.as_deref(),
                )
                .await
            }
        },
    }
}
