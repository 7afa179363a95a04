//! HTTP middleware and extractors for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (per-request hub, HTTP context)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (records into the span, echoes `x-request-id`)
//!
//! Authentication is an extractor, not a layer: handlers that take
//! [`RequireUser`] are protected, the rest are public.

pub mod auth;
pub mod request_id;

pub use auth::RequireUser;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
