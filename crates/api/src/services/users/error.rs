//! User service error types.

use thiserror::Error;

use contact_book_core::ValidationErrors;

use crate::db::RepositoryError;

/// Errors that can occur during account and session operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Request fields violated one or more rules.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Username is already registered.
    #[error("username already exists")]
    UsernameTaken,

    /// Wrong password or unknown username.
    #[error("username or password wrong")]
    InvalidCredentials,

    /// Missing, malformed, or revoked session token.
    #[error("unauthorized")]
    InvalidToken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
