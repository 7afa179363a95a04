//! User domain types.

use chrono::{DateTime, Utc};

use contact_book_core::UserId;

/// A registered user (domain type).
///
/// The password hash is deliberately absent; it is only ever loaded
/// alongside a user by [`crate::db::UserRepository::get_password_hash`].
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across all users.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Current session token, present while logged in.
    pub token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
