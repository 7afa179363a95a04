//! Token authentication extractor.
//!
//! Clients send the token issued at login in the `Authorization` header,
//! either bare or with a `Bearer ` prefix.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::models::User;
use crate::services::UserService;
use crate::state::AppState;

/// Extractor that requires a valid session token.
///
/// Rejects with `401 {"errors": "unauthorized"}` when the header is missing
/// or no user holds the token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(token_from_header)
            .ok_or_else(|| AppError::Unauthorized("unauthorized".to_string()))?;

        let user = UserService::new(state.pool()).authenticate(token).await?;

        set_sentry_user(&user.id, &user.username);
        tracing::debug!(user_id = %user.id, "Authenticated request");

        Ok(Self(user))
    }
}

/// Extract the token from an `Authorization` header value.
fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };

    (!token.is_empty()).then_some(token)
}
