//! HTTP route handlers for the contact book API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                     - Liveness probe
//! GET    /health/ready                               - Readiness probe (database)
//!
//! # Users
//! POST   /api/users                                  - Register
//! POST   /api/users/login                            - Login, returns token
//! GET    /api/users/current                          - Current user (auth)
//! PATCH  /api/users/current                          - Update name/password (auth)
//! DELETE /api/users/logout                           - Revoke token (auth)
//!
//! # Contacts (auth)
//! POST   /api/contacts                               - Create
//! GET    /api/contacts                               - Search (paginated)
//! GET    /api/contacts/{contact_id}                  - Get
//! PUT    /api/contacts/{contact_id}                  - Replace
//! DELETE /api/contacts/{contact_id}                  - Delete with addresses
//!
//! # Addresses (auth)
//! POST   /api/contacts/{contact_id}/addresses        - Create
//! GET    /api/contacts/{contact_id}/addresses        - List
//! GET    /api/contacts/{contact_id}/addresses/{id}   - Get
//! PUT    /api/contacts/{contact_id}/addresses/{id}   - Replace
//! DELETE /api/contacts/{contact_id}/addresses/{id}   - Delete
//! ```
//!
//! Successful responses wrap their payload as `{"data": ...}`; search adds
//! a `paging` object. Unknown paths and unsupported methods answer with the
//! same `{"errors": ...}` body as every other failure.

pub mod addresses;
pub mod contacts;
pub mod extract;
pub mod health;
pub mod users;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde::Serialize;

use contact_book_core::Paging;

use crate::error::AppError;
use crate::state::AppState;

/// Payload of delete and logout responses.
pub const OK: &str = "Ok";

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Success envelope for paginated results.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

/// Wrap a payload in the success envelope.
pub fn data<T>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data })
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/login", post(users::login))
        .route("/current", get(users::current).patch(users::update))
        .route("/logout", delete(users::logout))
}

/// Create the contact and nested address routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::search).post(contacts::create))
        .route(
            "/{contact_id}",
            get(contacts::show)
                .put(contacts::update)
                .delete(contacts::delete),
        )
        .route(
            "/{contact_id}/addresses",
            get(addresses::list).post(addresses::create),
        )
        .route(
            "/{contact_id}/addresses/{address_id}",
            get(addresses::show)
                .put(addresses::update)
                .delete(addresses::delete),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/users", user_routes())
        .nest("/api/contacts", contact_routes())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("method not allowed".to_string())
}
