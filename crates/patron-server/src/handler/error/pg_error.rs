//! Maps credential-store errors to HTTP errors.
//!
//! No store error detail ever reaches a response body; only the taxonomy
//! kind and a fixed client-safe message do.

use patron_postgres::PgError;

use crate::handler::{Error, ErrorKind};

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        // Unique-index violations on email/username are the storage-level
        // guarantee behind registration and profile updates.
        if let Some(violation) = error.constraint_violation()
            && violation.is_unique_violation()
        {
            tracing::debug!(
                constraint = %violation,
                "store rejected duplicate identity field"
            );

            return ErrorKind::Conflict
                .with_message("Customer with this email or username already exists")
                .with_resource("customer");
        }

        tracing::error!(error = %error, "credential store operation failed");

        ErrorKind::InternalServerError
            .with_message("A storage error occurred. Please try again later")
            .with_resource("customer")
    }
}
