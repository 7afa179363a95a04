//! Contact management scoped to the authenticated user.

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use contact_book_core::{ContactId, PageRequest, Paging, Validate, ValidationErrors, Validator};

use crate::db::RepositoryError;
use crate::db::contacts::ContactRepository;
use crate::models::{Contact, ContactFields, ContactFilter, User};

const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 200;
const MAX_PHONE_LENGTH: usize = 20;

/// Errors that can occur during contact operations.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Request fields violated one or more rules.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// No such contact is owned by the current user.
    #[error("contact is not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Body of contact create and full update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactRequest {
    /// Validate and convert into writable fields.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn into_fields(self) -> Result<ContactFields, ValidationErrors> {
        self.validate()?;
        Ok(ContactFields {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        })
    }
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_text("first_name", self.first_name.as_deref(), MAX_NAME_LENGTH)
            .optional_text("last_name", self.last_name.as_deref(), MAX_NAME_LENGTH)
            .optional_email("email", self.email.as_deref(), MAX_EMAIL_LENGTH)
            .optional_text("phone", self.phone.as_deref(), MAX_PHONE_LENGTH)
            .finish()
    }
}

/// Query string of `GET /api/contacts`.
///
/// Empty filter values (`?name=`) are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchContactsQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchContactsQuery {
    /// The page window requested, with defaults applied.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    /// The non-empty filters.
    #[must_use]
    pub fn filter(&self) -> ContactFilter {
        ContactFilter {
            name: non_empty(self.name.as_deref()).map(str::to_string),
            email: non_empty(self.email.as_deref()).map(str::to_string),
            phone: non_empty(self.phone.as_deref()).map(str::to_string),
        }
    }
}

impl Validate for SearchContactsQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_min("page", self.page, 1)
            .optional_range("size", self.size, 1, PageRequest::MAX_SIZE)
            .optional_text("name", non_empty(self.name.as_deref()), MAX_NAME_LENGTH)
            .optional_text("email", non_empty(self.email.as_deref()), MAX_EMAIL_LENGTH)
            .optional_text("phone", non_empty(self.phone.as_deref()), MAX_PHONE_LENGTH)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Contact service.
pub struct ContactService<'a> {
    contacts: ContactRepository<'a>,
}

impl<'a> ContactService<'a> {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            contacts: ContactRepository::new(pool),
        }
    }

    /// Create a contact owned by `user`.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Validation` if the request is invalid.
    pub async fn create(
        &self,
        user: &User,
        request: ContactRequest,
    ) -> Result<Contact, ContactError> {
        let fields = request.into_fields()?;
        let contact = self.contacts.create(user.id, &fields).await?;

        tracing::info!(user_id = %user.id, contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    /// Get one of `user`'s contacts.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::NotFound` if `user` owns no such contact.
    pub async fn get(&self, user: &User, id: ContactId) -> Result<Contact, ContactError> {
        self.contacts
            .get(user.id, id)
            .await?
            .ok_or(ContactError::NotFound)
    }

    /// Replace every writable field of one of `user`'s contacts.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Validation` if the request is invalid.
    /// Returns `ContactError::NotFound` if `user` owns no such contact.
    pub async fn update(
        &self,
        user: &User,
        id: ContactId,
        request: ContactRequest,
    ) -> Result<Contact, ContactError> {
        let fields = request.into_fields()?;
        let contact = self
            .contacts
            .update(user.id, id, &fields)
            .await?
            .ok_or(ContactError::NotFound)?;

        tracing::info!(user_id = %user.id, contact_id = %id, "Contact updated");
        Ok(contact)
    }

    /// Delete one of `user`'s contacts together with its addresses.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::NotFound` if `user` owns no such contact.
    pub async fn delete(&self, user: &User, id: ContactId) -> Result<(), ContactError> {
        if !self.contacts.delete(user.id, id).await? {
            return Err(ContactError::NotFound);
        }

        tracing::info!(user_id = %user.id, contact_id = %id, "Contact deleted");
        Ok(())
    }

    /// Search `user`'s contacts and return one page with its metadata.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Validation` if the paging or filters are out of range.
    pub async fn search(
        &self,
        user: &User,
        query: &SearchContactsQuery,
    ) -> Result<(Vec<Contact>, Paging), ContactError> {
        query.validate()?;
        let page = query.page_request();

        let (contacts, total) = self
            .contacts
            .search(user.id, &query.filter(), page)
            .await?;

        tracing::debug!(
            user_id = %user.id,
            page = page.page(),
            size = page.size(),
            total,
            "Contact search"
        );
        Ok((contacts, page.paging(total)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(first_name: &str) -> ContactRequest {
        ContactRequest {
            first_name: Some(first_name.to_string()),
            last_name: Some("test".to_string()),
            email: Some("test@pzn.com".to_string()),
            phone: Some("080900000".to_string()),
        }
    }

    #[test]
    fn test_into_fields() {
        let fields = request("test").into_fields().unwrap();
        assert_eq!(fields.first_name, "test");
        assert_eq!(fields.email.as_deref(), Some("test@pzn.com"));
    }

    #[test]
    fn test_only_first_name_required() {
        let fields = ContactRequest {
            first_name: Some("solo".to_string()),
            ..ContactRequest::default()
        }
        .into_fields()
        .unwrap();
        assert!(fields.last_name.is_none());
        assert!(fields.phone.is_none());
    }

    #[test]
    fn test_rejects_invalid_contact() {
        let errors = ContactRequest {
            first_name: Some(String::new()),
            last_name: Some("test".to_string()),
            email: Some("test".to_string()),
            phone: Some("0809000000043534534543534534543535345435435".to_string()),
        }
        .into_fields()
        .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.has_field("first_name"));
        assert!(errors.has_field("email"));
        assert!(errors.has_field("phone"));
    }

    #[test]
    fn test_search_defaults() {
        let query = SearchContactsQuery::default();
        assert!(query.validate().is_ok());
        assert_eq!(query.page_request(), PageRequest::new(Some(1), Some(10)));
        assert_eq!(query.filter(), ContactFilter::default());
    }

    #[test]
    fn test_search_empty_filters_are_ignored() {
        let query = SearchContactsQuery {
            name: Some(String::new()),
            phone: Some("0809".to_string()),
            ..SearchContactsQuery::default()
        };
        assert!(query.validate().is_ok());

        let filter = query.filter();
        assert!(filter.name.is_none());
        assert_eq!(filter.phone.as_deref(), Some("0809"));
    }

    #[test]
    fn test_search_rejects_out_of_range_paging() {
        let query = SearchContactsQuery {
            page: Some(0),
            size: Some(101),
            ..SearchContactsQuery::default()
        };
        let errors = query.validate().unwrap_err();
        assert!(errors.has_field("page"));
        assert!(errors.has_field("size"));
    }
}
