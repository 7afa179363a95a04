//! Contact book CLI - Database migrations and user management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! cb-cli migrate
//!
//! # Create a user (password read from CB_USER_PASSWORD)
//! CB_USER_PASSWORD=secret cb-cli user create -u alice -n "Alice Doe"
//!
//! # Revoke a user's session token
//! cb-cli user logout -u alice
//! ```
//!
//! # Environment Variables
//!
//! - `API_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "Contact book CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user; the password is read from `CB_USER_PASSWORD`
    Create {
        /// Login username
        #[arg(short, long)]
        username: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Revoke a user's session token
    Logout {
        /// Login username
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create { username, name } => {
                commands::user::create(&username, &name).await?;
            }
            UserAction::Logout { username } => commands::user::logout(&username).await?,
        },
    }
    Ok(())
}
