//! Typed errors returned by HTTP handlers.
//!
//! An [`ErrorKind`] names one entry of the error taxonomy; an [`Error`]
//! optionally layers a client-safe message, resource, and context on top of
//! it. Both convert straight into a response, so handlers can `?` their way
//! out of any failure.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// A specialized [`Result`] for HTTP handlers.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every error kind this API emits, by status code family.
///
/// The three token-verification failures (`MissingAuthToken`,
/// `MalformedAuthToken`, `Unauthorized`) are distinct internally but all
/// answer 401, so a client cannot tell an expired token from a forged one.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400 - a required path parameter is missing.
    MissingPathParam,
    /// 400 - the request payload is invalid.
    BadRequest,
    /// 401 - no Authorization header was presented.
    MissingAuthToken,
    /// 401 - the presented token cannot be parsed.
    MalformedAuthToken,
    /// 401 - bad credentials, or a forged/expired token.
    Unauthorized,
    /// 403 - authenticated but lacking the required role.
    Forbidden,
    /// 404 - the referenced record does not exist.
    NotFound,
    /// 409 - a duplicate identity field.
    Conflict,
    /// 500 - store failure, upload failure, or anything unexpected.
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Attaches a client-safe message, producing a full [`Error`].
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Attaches context, producing a full [`Error`].
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Attaches a resource, producing a full [`Error`].
    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// Returns the status code this kind answers with.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the fixed response body for this kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::MissingPathParam => ErrorResponse::MISSING_PATH_PARAM,
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN,
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::Forbidden => ErrorResponse::FORBIDDEN,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

/// An [`ErrorKind`] plus whatever a handler layered on top of it.
///
/// Built with the `with_*` methods on [`ErrorKind`] and chained freely:
///
/// ```ignore
/// return Err(ErrorKind::NotFound
///     .with_message("Customer not found")
///     .with_resource("customer"));
/// ```
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a bare error of the given kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
            context: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Sets a client-safe message appended to the kind's fixed one.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the resource the error relates to.
    #[inline]
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets extra detail included in the response body.
    #[inline]
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns the underlying kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the custom message, if set.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the resource, if set.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the context, if set.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Error");
        s.field("kind", &self.kind)
            .field("status", &self.kind.status_code());

        if let Some(ref message) = self.message {
            s.field("message", message);
        }
        if let Some(ref resource) = self.resource {
            s.field("resource", resource);
        }
        if let Some(ref context) = self.context {
            s.field("context", context);
        }

        s.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        write!(
            f,
            "{} ({}): {}",
            response.name,
            response.status,
            self.message.as_deref().unwrap_or(response.message.as_ref())
        )?;

        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {resource}]")?;
        }
        if let Some(ref context) = self.context {
            write!(f, " - {context}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }
        if let Some(resource) = self.resource {
            response = response.with_resource(resource);
        }
        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        response.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_expected_statuses() {
        assert_eq!(ErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorKind::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorKind::InternalServerError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn token_failures_all_answer_unauthorized() {
        for kind in [
            ErrorKind::MissingAuthToken,
            ErrorKind::MalformedAuthToken,
            ErrorKind::Unauthorized,
        ] {
            assert_eq!(kind.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn builder_preserves_all_parts() {
        let error = ErrorKind::NotFound
            .with_message("Customer not found")
            .with_resource("customer")
            .with_context("ID: 123");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Customer not found"));
        assert_eq!(error.resource(), Some("customer"));
        assert_eq!(error.context(), Some("ID: 123"));
    }

    #[test]
    fn display_names_kind_and_status() {
        let error = ErrorKind::NotFound
            .with_message("Customer not found")
            .with_resource("customer");

        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("Customer not found"));
        assert!(display.contains("customer"));
    }

    #[test]
    fn default_error_is_internal() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let _: &dyn std::error::Error = &error;
        let _ = error.into_response();
    }
}
