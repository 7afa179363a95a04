//! Database migration command.
//!
//! Applies the migrations embedded from `crates/api/migrations/`. Already
//! applied migrations are skipped, so running this twice is harmless.

use contact_book_api::db;

use super::{CommandError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
