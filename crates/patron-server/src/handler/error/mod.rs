//! Error types used by HTTP handlers.

mod http_error;
mod pg_error;
mod upload_error;

pub use http_error::{Error, ErrorKind, Result};
