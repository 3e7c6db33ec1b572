//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Authentication and authorization gates are explicit composable
//! request-interceptors: they either continue the request with the verified
//! identity cached in its extensions, or short-circuit with a typed error
//! before the wrapped handler runs.

mod auth;

pub use auth::{require_admin, require_authentication};
