//! Core types for the contact book.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod paging;

pub use email::{Email, EmailError};
pub use id::*;
pub use paging::{PageRequest, Paging};
