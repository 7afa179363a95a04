//! Contact Book Core - Shared types library.
//!
//! This crate provides common types used across all contact book components:
//! - `api` - The REST API server
//! - `cli` - Command-line tools for migrations and user management
//! - `integration-tests` - End-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails and paging metadata
//! - [`validation`] - Field-level request validation that reports every violation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{FieldError, Validate, ValidationErrors, Validator};
