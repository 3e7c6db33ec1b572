#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();

/// Tracing target for database query operations.
pub const TRACING_TARGET_QUERY: &str = "patron_postgres::queries";

/// Tracing target for database migration operations.
pub const TRACING_TARGET_MIGRATION: &str = "patron_postgres::migrations";

/// Tracing target for connection and pool operations.
pub const TRACING_TARGET_CONNECTION: &str = "patron_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;
pub mod types;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::Error;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{
    ConnectionPool, PgClient, PgConfig, PgConn, PgPoolStatus, PooledConnection,
};
use crate::types::ConstraintViolation;

/// Type-erased error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for every operation against the credential store.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// A configuration value was rejected before any connection was made.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Checkout, creation, or recycling of a pooled connection timed out.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// A connection could not be established or went bad.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Applying an embedded migration failed.
    #[error("Database migration error: {0}")]
    Migration(BoxError),

    /// A query failed; constraint violations land here.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// Anything the other variants do not cover.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Returns the name of the violated constraint, if this is a
    /// constraint-violation error.
    pub fn constraint(&self) -> Option<&str> {
        let PgError::Query(Error::DatabaseError(_, info)) = self else {
            return None;
        };

        info.constraint_name()
    }

    /// Parses the violated constraint into a typed [`ConstraintViolation`].
    ///
    /// Returns `None` when the error is not a constraint violation or the
    /// constraint name is not one declared by the migrations.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        self.constraint().and_then(ConstraintViolation::new)
    }
}

impl From<diesel_async::pooled_connection::deadpool::PoolError> for PgError {
    fn from(value: diesel_async::pooled_connection::deadpool::PoolError) -> Self {
        use diesel_async::pooled_connection::PoolError as DieselPoolError;
        use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => Self::Unexpected(err.to_string().into()),
            DeadpoolError::NoRuntimeSpecified => {
                Self::Unexpected("no async runtime specified for the pool".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;
