//! Extractors whose rejections use the API's JSON error format.

use axum::extract::{FromRequest, FromRequestParts};

use contact_book_core::{AddressId, ContactId};

use crate::error::AppError;

/// `Json` with malformed bodies rejected as `400 {"errors": "..."}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Query` with malformed query strings rejected as `400 {"errors": "..."}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `Path` with rejections reported as `404`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Parse a contact ID path segment; anything but a positive integer is a 404.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the segment is not a valid ID.
pub fn contact_id(segment: &str) -> Result<ContactId, AppError> {
    ContactId::parse_path(segment)
        .ok_or_else(|| AppError::NotFound("contact is not found".to_string()))
}

/// Parse an address ID path segment; anything but a positive integer is a 404.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the segment is not a valid ID.
pub fn address_id(segment: &str) -> Result<AddressId, AppError> {
    AddressId::parse_path(segment)
        .ok_or_else(|| AppError::NotFound("address is not found".to_string()))
}
