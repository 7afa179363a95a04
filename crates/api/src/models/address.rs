//! Address domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use contact_book_core::{AddressId, ContactId};

/// A postal address belonging to exactly one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: AddressId,
    /// Owning contact. Never exposed over the API.
    #[serde(skip)]
    pub contact_id: ContactId,
    pub street: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// Validated, writable address fields (create and full update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub street: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
}
