//! Contact domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use contact_book_core::{ContactId, UserId};

/// A contact owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub id: ContactId,
    /// Owning user. Never exposed over the API.
    #[serde(skip)]
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// Validated, writable contact fields (create and full update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Optional search filters, combined with AND.
///
/// Each filter is a case-insensitive substring match; `name` matches
/// either the first or the last name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
