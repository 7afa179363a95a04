//! Domain models for the contact book.
//!
//! These types represent validated domain objects separate from database
//! row types (see [`crate::db`]).

pub mod address;
pub mod contact;
pub mod user;

pub use address::{Address, AddressFields};
pub use contact::{Contact, ContactFields, ContactFilter};
pub use user::User;
