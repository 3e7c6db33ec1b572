//! Errors raised while constructing the service (configuration, store
//! connection, collaborator clients). Request-time failures use the handler
//! error types instead.

use patron_postgres::BoxError;
use thiserror::Error;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure constructing or wiring the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The credential store could not be reached or migrated.
    #[error("credential store unavailable: {message}")]
    Database {
        message: String,
        #[source]
        source: BoxError,
    },

    /// An external collaborator could not be set up.
    #[error("{service} unavailable: {message}")]
    ExternalService {
        service: &'static str,
        message: String,
        #[source]
        source: BoxError,
    },
}

impl ServiceError {
    /// Configuration error with the given explanation.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Database error wrapping its underlying cause.
    pub fn database_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// External service error wrapping its underlying cause.
    pub fn external_service_with_source(
        service: &'static str,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ExternalService {
            service,
            message: message.into(),
            source: Box::new(source),
        }
    }
}
