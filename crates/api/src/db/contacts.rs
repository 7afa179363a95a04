//! Contact repository for database operations.
//!
//! Every statement is constrained by `user_id`, so a contact belonging to
//! someone else behaves exactly like a contact that does not exist.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use contact_book_core::{ContactId, PageRequest, UserId};

use super::RepositoryError;
use crate::models::{Contact, ContactFields, ContactFilter};

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: ContactId,
    user_id: UserId,
    first_name: String,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared `WHERE` clause for search and its count.
///
/// `$1` is the owner; `$2..$4` are `ILIKE` patterns or `NULL` to skip a filter.
macro_rules! search_predicate {
    () => {
        r"
        WHERE user_id = $1
          AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2)
          AND ($3::text IS NULL OR email ILIKE $3)
          AND ($4::text IS NULL OR phone ILIKE $4)
        "
    };
}

/// Repository for contact database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a contact owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        fields: &ContactFields,
    ) -> Result<Contact, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            INSERT INTO contacts (user_id, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, first_name, last_name, email, phone, created_at, updated_at
            ",
        )
        .bind(owner)
        .bind(&fields.first_name)
        .bind(fields.last_name.as_deref())
        .bind(fields.email.as_deref())
        .bind(fields.phone.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a contact by ID, scoped to `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        owner: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, user_id, first_name, last_name, email, phone, created_at, updated_at
            FROM contacts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Contact::from))
    }

    /// Replace all writable fields of a contact, scoped to `owner`.
    ///
    /// Returns `None` if no such contact is owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        owner: UserId,
        id: ContactId,
        fields: &ContactFields,
    ) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            UPDATE contacts
            SET first_name = $3, last_name = $4, email = $5, phone = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, first_name, last_name, email, phone, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(owner)
        .bind(&fields.first_name)
        .bind(fields.last_name.as_deref())
        .bind(fields.email.as_deref())
        .bind(fields.phone.as_deref())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Contact::from))
    }

    /// Delete a contact (and, by cascade, its addresses), scoped to `owner`.
    ///
    /// # Returns
    ///
    /// Returns `true` if the contact was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, owner: UserId, id: ContactId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM contacts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(owner)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Search an owner's contacts, returning one page plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn search(
        &self,
        owner: UserId,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<(Vec<Contact>, i64), RepositoryError> {
        let name = filter.name.as_deref().map(contains_pattern);
        let email = filter.email.as_deref().map(contains_pattern);
        let phone = filter.phone.as_deref().map(contains_pattern);

        let rows = sqlx::query_as::<_, ContactRow>(concat!(
            "SELECT id, user_id, first_name, last_name, email, phone, created_at, updated_at
            FROM contacts",
            search_predicate!(),
            "ORDER BY id ASC
            LIMIT $5 OFFSET $6"
        ))
        .bind(owner)
        .bind(name.as_deref())
        .bind(email.as_deref())
        .bind(phone.as_deref())
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(concat!(
            "SELECT COUNT(*) FROM contacts",
            search_predicate!()
        ))
        .bind(owner)
        .bind(name.as_deref())
        .bind(email.as_deref())
        .bind(phone.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok((rows.into_iter().map(Contact::from).collect(), total))
    }
}

/// Build an `ILIKE` pattern matching `needle` anywhere, with its own
/// wildcards treated literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
