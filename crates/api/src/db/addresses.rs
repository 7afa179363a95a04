//! Address repository for database operations.
//!
//! Callers must resolve the contact under its owner first; these queries
//! only enforce the contact half of the ownership chain.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use contact_book_core::{AddressId, ContactId};

use super::RepositoryError;
use crate::models::{Address, AddressFields};

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: AddressId,
    contact_id: ContactId,
    street: String,
    city: String,
    province: String,
    country: String,
    postal_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            contact_id: row.contact_id,
            street: row.street,
            city: row.city,
            province: row.province,
            country: row.country,
            postal_code: row.postal_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an address for a contact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        contact_id: ContactId,
        fields: &AddressFields,
    ) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, contact_id, street, city, province, country, postal_code,
                      created_at, updated_at
            ",
        )
        .bind(contact_id)
        .bind(&fields.street)
        .bind(&fields.city)
        .bind(&fields.province)
        .bind(&fields.country)
        .bind(&fields.postal_code)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get an address by ID, scoped to its contact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        contact_id: ContactId,
        id: AddressId,
    ) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, contact_id, street, city, province, country, postal_code,
                   created_at, updated_at
            FROM addresses
            WHERE id = $1 AND contact_id = $2
            ",
        )
        .bind(id)
        .bind(contact_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    /// Replace all writable fields of an address, scoped to its contact.
    ///
    /// Returns `None` if the contact has no such address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        contact_id: ContactId,
        id: AddressId,
        fields: &AddressFields,
    ) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            UPDATE addresses
            SET street = $3, city = $4, province = $5, country = $6, postal_code = $7,
                updated_at = NOW()
            WHERE id = $1 AND contact_id = $2
            RETURNING id, contact_id, street, city, province, country, postal_code,
                      created_at, updated_at
            ",
        )
        .bind(id)
        .bind(contact_id)
        .bind(&fields.street)
        .bind(&fields.city)
        .bind(&fields.province)
        .bind(&fields.country)
        .bind(&fields.postal_code)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    /// Delete an address, scoped to its contact.
    ///
    /// # Returns
    ///
    /// Returns `true` if the address was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(
        &self,
        contact_id: ContactId,
        id: AddressId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM addresses
            WHERE id = $1 AND contact_id = $2
            ",
        )
        .bind(id)
        .bind(contact_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all addresses of a contact, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, contact_id: ContactId) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, contact_id, street, city, province, country, postal_code,
                   created_at, updated_at
            FROM addresses
            WHERE contact_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(contact_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }
}
