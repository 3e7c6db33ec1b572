//! Service layer: configuration, shared state, and auth primitives.

pub mod auth;
mod error;
mod service_config;
mod service_state;

pub use crate::service::auth::{AuthHasher, TokenKeys};
pub use crate::service::error::{Result, ServiceError};
pub use crate::service::service_config::ServiceConfig;
pub use crate::service::service_state::ServiceState;
