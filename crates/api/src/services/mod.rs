//! Business logic services.
//!
//! # Services
//!
//! - `users` - Registration, password login, session tokens and profile updates
//! - `contacts` - Contact CRUD and paginated search, scoped to the caller
//! - `addresses` - Address CRUD, scoped through the owning contact
//!
//! Services borrow the pool and are built per request. Request bodies are
//! validated here, not in the handlers.

pub mod addresses;
pub mod contacts;
pub mod users;

pub use addresses::{AddressError, AddressRequest, AddressService};
pub use contacts::{ContactError, ContactRequest, ContactService, SearchContactsQuery};
pub use users::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserError, UserService};
