//! CLI subcommands.

pub mod migrate;
pub mod user;

use contact_book_api::config::{ApiConfig, ConfigError};
use contact_book_api::db;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// User operation failed.
    #[error(transparent)]
    User(#[from] contact_book_api::services::UserError),

    /// No user has the given username.
    #[error("No user with username: {0}")]
    UnknownUser(String),
}

/// Connect to the API database using the same configuration as the server.
async fn connect() -> Result<PgPool, CommandError> {
    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&config.database_url).await?)
}
