//! User management commands.
//!
//! # Environment Variables
//!
//! - `CB_USER_PASSWORD` - Password for `user create`, kept off the command line

use contact_book_api::db::UserRepository;
use contact_book_api::services::{RegisterUserRequest, UserService};

use super::{CommandError, connect};

const PASSWORD_ENV: &str = "CB_USER_PASSWORD";

/// Create a new user.
///
/// # Errors
///
/// Returns `CommandError::MissingEnvVar` if `CB_USER_PASSWORD` is unset.
/// Returns `CommandError::User` if validation fails or the username is taken.
pub async fn create(username: &str, name: &str) -> Result<(), CommandError> {
    // Connecting first also loads `.env`
    let pool = connect().await?;

    let password =
        std::env::var(PASSWORD_ENV).map_err(|_| CommandError::MissingEnvVar(PASSWORD_ENV))?;

    let request = RegisterUserRequest {
        username: Some(username.to_string()),
        password: Some(password),
        name: Some(name.to_string()),
    };
    let user = UserService::new(&pool).register(&request).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(())
}

/// Revoke a user's session token.
///
/// # Errors
///
/// Returns `CommandError::UnknownUser` if no user has `username`.
pub async fn logout(username: &str) -> Result<(), CommandError> {
    let pool = connect().await?;

    let user = UserRepository::new(&pool)
        .get_by_username(username)
        .await
        .map_err(contact_book_api::services::UserError::from)?
        .ok_or_else(|| CommandError::UnknownUser(username.to_string()))?;

    UserService::new(&pool).logout(&user).await?;

    tracing::info!("Session revoked for {}", user.username);
    Ok(())
}
