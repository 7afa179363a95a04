//! Address management.
//!
//! Addresses are reached through their contact, so every operation first
//! resolves the contact under the current user. A contact owned by someone
//! else is reported exactly like a missing one.

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use contact_book_core::{AddressId, ContactId, Validate, ValidationErrors, Validator};

use crate::db::RepositoryError;
use crate::db::addresses::AddressRepository;
use crate::db::contacts::ContactRepository;
use crate::models::{Address, AddressFields, User};

const MAX_STREET_LENGTH: usize = 255;
const MAX_REGION_LENGTH: usize = 100;
const MAX_POSTAL_CODE_LENGTH: usize = 10;

/// Errors that can occur during address operations.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Request fields violated one or more rules.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The parent contact does not exist for the current user.
    #[error("contact is not found")]
    ContactNotFound,

    /// The contact has no such address.
    #[error("address is not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Body of address create and full update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl AddressRequest {
    /// Validate and convert into writable fields.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn into_fields(self) -> Result<AddressFields, ValidationErrors> {
        self.validate()?;
        Ok(AddressFields {
            street: self.street.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            province: self.province.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            postal_code: self.postal_code.unwrap_or_default(),
        })
    }
}

impl Validate for AddressRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_text("street", self.street.as_deref(), MAX_STREET_LENGTH)
            .required_text("city", self.city.as_deref(), MAX_REGION_LENGTH)
            .required_text("province", self.province.as_deref(), MAX_REGION_LENGTH)
            .required_text("country", self.country.as_deref(), MAX_REGION_LENGTH)
            .required_text(
                "postal_code",
                self.postal_code.as_deref(),
                MAX_POSTAL_CODE_LENGTH,
            )
            .finish()
    }
}

/// Address service.
pub struct AddressService<'a> {
    contacts: ContactRepository<'a>,
    addresses: AddressRepository<'a>,
}

impl<'a> AddressService<'a> {
    /// Create a new address service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            contacts: ContactRepository::new(pool),
            addresses: AddressRepository::new(pool),
        }
    }

    /// Add an address to one of `user`'s contacts.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::ContactNotFound` if `user` owns no such contact.
    /// Returns `AddressError::Validation` if the request is invalid.
    pub async fn create(
        &self,
        user: &User,
        contact_id: ContactId,
        request: AddressRequest,
    ) -> Result<Address, AddressError> {
        self.require_contact(user, contact_id).await?;
        let fields = request.into_fields()?;

        let address = self.addresses.create(contact_id, &fields).await?;

        tracing::info!(
            user_id = %user.id,
            contact_id = %contact_id,
            address_id = %address.id,
            "Address created"
        );
        Ok(address)
    }

    /// Get one address of one of `user`'s contacts.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::ContactNotFound` or `AddressError::NotFound`.
    pub async fn get(
        &self,
        user: &User,
        contact_id: ContactId,
        id: AddressId,
    ) -> Result<Address, AddressError> {
        self.require_contact(user, contact_id).await?;

        self.addresses
            .get(contact_id, id)
            .await?
            .ok_or(AddressError::NotFound)
    }

    /// Replace every writable field of an address.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::ContactNotFound` or `AddressError::NotFound`.
    /// Returns `AddressError::Validation` if the request is invalid.
    pub async fn update(
        &self,
        user: &User,
        contact_id: ContactId,
        id: AddressId,
        request: AddressRequest,
    ) -> Result<Address, AddressError> {
        self.require_contact(user, contact_id).await?;
        let fields = request.into_fields()?;

        let address = self
            .addresses
            .update(contact_id, id, &fields)
            .await?
            .ok_or(AddressError::NotFound)?;

        tracing::info!(
            user_id = %user.id,
            contact_id = %contact_id,
            address_id = %id,
            "Address updated"
        );
        Ok(address)
    }

    /// Delete an address.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::ContactNotFound` or `AddressError::NotFound`.
    pub async fn delete(
        &self,
        user: &User,
        contact_id: ContactId,
        id: AddressId,
    ) -> Result<(), AddressError> {
        self.require_contact(user, contact_id).await?;

        if !self.addresses.delete(contact_id, id).await? {
            return Err(AddressError::NotFound);
        }

        tracing::info!(
            user_id = %user.id,
            contact_id = %contact_id,
            address_id = %id,
            "Address deleted"
        );
        Ok(())
    }

    /// List every address of one of `user`'s contacts.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::ContactNotFound` if `user` owns no such contact.
    pub async fn list(
        &self,
        user: &User,
        contact_id: ContactId,
    ) -> Result<Vec<Address>, AddressError> {
        self.require_contact(user, contact_id).await?;
        Ok(self.addresses.list(contact_id).await?)
    }

    async fn require_contact(
        &self,
        user: &User,
        contact_id: ContactId,
    ) -> Result<(), AddressError> {
        self.contacts
            .get(user.id, contact_id)
            .await?
            .map(|_| ())
            .ok_or(AddressError::ContactNotFound)
    }
}
