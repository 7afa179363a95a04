//! Field-level request validation.
//!
//! Request types implement [`Validate`] by running a [`Validator`] over their
//! fields. Every rule is evaluated, so a single response can report all of
//! the problems with a request rather than only the first one.
//!
//! ```
//! use contact_book_core::{Validate, ValidationErrors, Validator};
//!
//! struct NewTag {
//!     label: Option<String>,
//! }
//!
//! impl Validate for NewTag {
//!     fn validate(&self) -> Result<(), ValidationErrors> {
//!         Validator::new()
//!             .required_text("label", self.label.as_deref(), 20)
//!             .finish()
//!     }
//! }
//!
//! assert!(NewTag { label: Some("family".into()) }.validate().is_ok());
//! assert!(NewTag { label: Some("   ".into()) }.validate().is_err());
//! ```

use core::fmt;

use serde::Serialize;

use crate::Email;

const NUL_MESSAGE: &str = "must not contain null characters";

/// A single violated rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as it appears in the request.
    pub field: String,
    /// Human readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// All violations found while validating one request.
///
/// Never empty when returned as an error from [`Validator::finish`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, thiserror::Error)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Build from a single violation.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    /// The violations, in the order the rules were declared.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether a given field has at least one violation.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

/// Types that can check their own field constraints.
pub trait Validate {
    /// Run every rule and report all violations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each violated rule.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Accumulating rule runner used to implement [`Validate`].
///
/// Each method checks one field and records at most one violation for it.
#[derive(Debug, Default)]
#[must_use]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Start a new validation pass.
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// The field must be present, not blank, and at most `max` characters.
    pub fn required_text(mut self, field: &str, value: Option<&str>, max: usize) -> Self {
        match value {
            None => self.push(field, "is required"),
            Some(v) => self.check_text(field, v, max),
        }
        self
    }

    /// If present, the field must not be blank and must be at most `max` characters.
    pub fn optional_text(mut self, field: &str, value: Option<&str>, max: usize) -> Self {
        if let Some(v) = value {
            self.check_text(field, v, max);
        }
        self
    }

    /// If present, the field must be a well-formed email of at most `max` characters.
    pub fn optional_email(mut self, field: &str, value: Option<&str>, max: usize) -> Self {
        if let Some(v) = value {
            if v.contains('\0') {
                self.push(field, NUL_MESSAGE);
            } else if v.chars().count() > max {
                self.push(field, format!("length must be less than or equal to {max} characters"));
            } else if let Err(e) = Email::parse(v) {
                self.push(field, format!("must be a valid email ({e})"));
            }
        }
        self
    }

    /// If present, the number must lie within `min..=max`.
    pub fn optional_range(mut self, field: &str, value: Option<i64>, min: i64, max: i64) -> Self {
        if let Some(v) = value
            && !(min..=max).contains(&v)
        {
            if v < min {
                self.push(field, format!("must be greater than or equal to {min}"));
            } else {
                self.push(field, format!("must be less than or equal to {max}"));
            }
        }
        self
    }

    /// If present, the number must be at least `min`.
    pub fn optional_min(mut self, field: &str, value: Option<i64>, min: i64) -> Self {
        if let Some(v) = value
            && v < min
        {
            self.push(field, format!("must be greater than or equal to {min}"));
        }
        self
    }

    /// Finish the pass.
    ///
    /// # Errors
    ///
    /// Returns every recorded violation if any rule failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }

    // PostgreSQL text columns cannot store NUL.
    fn check_text(&mut self, field: &str, value: &str, max: usize) {
        if value.contains('\0') {
            self.push(field, NUL_MESSAGE);
        } else if value.trim().is_empty() {
            self.push(field, "is not allowed to be empty");
        } else {
            self.check_max(field, value, max);
        }
    }

    fn check_max(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(
                field,
                format!("length must be less than or equal to {max} characters"),
            );
        }
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }
}
