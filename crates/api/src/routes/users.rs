//! User account and session routes.

use axum::{Json, extract::State};
use serde::Serialize;

use super::extract::ApiJson;
use super::{DataResponse, OK, data};
use crate::error::{Result, clear_sentry_user};
use crate::middleware::RequireUser;
use crate::models::User;
use crate::services::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserService};
use crate::state::AppState;

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// Session token issued at login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new account.
///
/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterUserRequest>,
) -> Result<Json<DataResponse<UserResponse>>> {
    let user = UserService::new(state.pool()).register(&request).await?;
    Ok(data(user.into()))
}

/// Exchange username and password for a session token.
///
/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginUserRequest>,
) -> Result<Json<DataResponse<TokenResponse>>> {
    let token = UserService::new(state.pool()).login(&request).await?;
    Ok(data(TokenResponse { token }))
}

/// Get the authenticated user.
///
/// GET /api/users/current
pub async fn current(RequireUser(user): RequireUser) -> Json<DataResponse<UserResponse>> {
    data(user.into())
}

/// Update the authenticated user's name and/or password.
///
/// PATCH /api/users/current
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<DataResponse<UserResponse>>> {
    let user = UserService::new(state.pool())
        .update(&user, &request)
        .await?;
    Ok(data(user.into()))
}

/// Revoke the authenticated user's token.
///
/// DELETE /api/users/logout
pub async fn logout(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<DataResponse<&'static str>>> {
    UserService::new(state.pool()).logout(&user).await?;
    clear_sentry_user();
    Ok(data(OK))
}
