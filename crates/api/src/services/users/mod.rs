//! Account and session management.
//!
//! A user holds at most one session token at a time. Logging in replaces
//! it and logging out clears it, so an older token stops authenticating as
//! soon as a newer one is issued.

mod error;

pub use error::UserError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use contact_book_core::{Validate, ValidationErrors, Validator};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

const MAX_USERNAME_LENGTH: usize = 100;
const MAX_PASSWORD_LENGTH: usize = 100;
const MAX_NAME_LENGTH: usize = 100;

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl Validate for RegisterUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_text("username", self.username.as_deref(), MAX_USERNAME_LENGTH)
            .required_text("password", self.password.as_deref(), MAX_PASSWORD_LENGTH)
            .required_text("name", self.name.as_deref(), MAX_NAME_LENGTH)
            .finish()
    }
}

/// Body of `POST /api/users/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Validate for LoginUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_text("username", self.username.as_deref(), MAX_USERNAME_LENGTH)
            .required_text("password", self.password.as_deref(), MAX_PASSWORD_LENGTH)
            .finish()
    }
}

/// Body of `PATCH /api/users/current`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_text("name", self.name.as_deref(), MAX_NAME_LENGTH)
            .optional_text("password", self.password.as_deref(), MAX_PASSWORD_LENGTH)
            .finish()
    }
}

/// User service.
///
/// Handles registration, password login, token authentication and profile
/// updates.
pub struct UserService<'a> {
    users: UserRepository<'a>,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::Validation` if any field is missing or too long.
    /// Returns `UserError::UsernameTaken` if the username is already registered.
    pub async fn register(&self, request: &RegisterUserRequest) -> Result<User, UserError> {
        request.validate()?;
        let (username, password, name) = (
            request.username.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
            request.name.as_deref().unwrap_or_default(),
        );

        // Cheap pre-check; the unique index still decides races.
        if self.users.get_by_username(username).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(username, &password_hash, name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => UserError::UsernameTaken,
                other => UserError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue a fresh session token.
    ///
    /// # Errors
    ///
    /// Returns `UserError::Validation` if a field is missing or too long.
    /// Returns `UserError::InvalidCredentials` if the username/password is wrong.
    pub async fn login(&self, request: &LoginUserRequest) -> Result<String, UserError> {
        request.validate()?;
        let username = request.username.as_deref().unwrap_or_default();
        let password = request.password.as_deref().unwrap_or_default();

        let (user, password_hash) = self
            .users
            .get_password_hash(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = Uuid::new_v4().to_string();
        self.users.set_token(user.id, Some(&token)).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Resolve a session token to its user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidToken` if no user holds the token.
    pub async fn authenticate(&self, token: &str) -> Result<User, UserError> {
        if token.is_empty() {
            return Err(UserError::InvalidToken);
        }

        self.users
            .get_by_token(token)
            .await?
            .ok_or(UserError::InvalidToken)
    }

    /// Update the current user's name and/or password.
    ///
    /// # Errors
    ///
    /// Returns `UserError::Validation` if a provided field is blank or too long.
    pub async fn update(
        &self,
        user: &User,
        request: &UpdateUserRequest,
    ) -> Result<User, UserError> {
        request.validate()?;

        let password_hash = request
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?;

        let updated = self
            .users
            .update_profile(user.id, request.name.as_deref(), password_hash.as_deref())
            .await?;

        tracing::info!(
            user_id = %user.id,
            name_changed = request.name.is_some(),
            password_changed = password_hash.is_some(),
            "User updated"
        );
        Ok(updated)
    }

    /// Revoke the user's session token.
    ///
    /// # Errors
    ///
    /// Returns `UserError::Repository` if the user vanished or the update fails.
    pub async fn logout(&self, user: &User) -> Result<(), UserError> {
        self.users.set_token(user.id, None).await?;
        tracing::info!(user_id = %user.id, "User logged out");
        Ok(())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| UserError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), UserError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| UserError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| UserError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("rahasia").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("rahasia", &hash).is_ok());
        assert!(matches!(
            verify_password("salah", &hash),
            Err(UserError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hash_is_salted() {
        assert_ne!(hash_password("secret").unwrap(), hash_password("secret").unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("secret", "not-a-phc-string"),
            Err(UserError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_requires_all_fields() {
        let errors = RegisterUserRequest {
            username: Some(String::new()),
            password: None,
            name: Some("test".to_string()),
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("username"));
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_register_rejects_long_username() {
        let request = RegisterUserRequest {
            username: Some("u".repeat(101)),
            password: Some("rahasia".to_string()),
            name: Some("test".to_string()),
        };
        assert!(request.validate().unwrap_err().has_field("username"));
    }

    #[test]
    fn test_update_accepts_empty_body() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let request = UpdateUserRequest {
            name: Some(" ".to_string()),
            password: None,
        };
        assert!(request.validate().unwrap_err().has_field("name"));
    }

    #[test]
    fn test_login_deserializes_partial_body() {
        let request: LoginUserRequest = serde_json::from_str(r#"{"username":"test"}"#).unwrap();
        assert_eq!(request.username.as_deref(), Some("test"));
        assert!(request.validate().unwrap_err().has_field("password"));
    }
}
