//! Serialized error bodies.
//!
//! Every failure leaving the API goes through one of the fixed responses
//! below; handlers may append a client-safe message, resource, or context,
//! but internal detail (store errors, stack traces) never reaches the body.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body of an error response.
///
/// The `name` is a stable machine-readable identifier; `message` is safe to
/// show to end users. The status code rides along unserialized.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// Stable identifier of the error kind.
    pub name: Cow<'a, str>,
    /// Human-readable message safe for client display.
    pub message: Cow<'a, str>,
    /// Resource the error relates to, when a handler sets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Extra detail about the failure, when a handler sets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code; conveyed by the response line, not the body.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request is invalid and could not be processed",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "The request conflicts with existing data",
        StatusCode::CONFLICT,
    );
    pub const FORBIDDEN: Self = Self::new(
        "forbidden",
        "You do not have permission to perform this action",
        StatusCode::FORBIDDEN,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Something went wrong on our side. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "The authentication token could not be parsed",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "Authentication is required for this endpoint",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "A required request parameter is missing",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource does not exist",
        StatusCode::NOT_FOUND,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "Authentication credentials are invalid or expired",
        StatusCode::UNAUTHORIZED,
    );

    /// Creates an error response body.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Appends a resource to the body, `/`-joined to any existing one.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let addition = resource.into();
        self.resource = Some(match self.resource.take() {
            Some(existing) => Cow::Owned(format!("{existing}/{addition}")),
            None => addition,
        });
        self
    }

    /// Appends a sentence to the message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        let addition = message.into();
        self.message = Cow::Owned(format!("{}. {addition}", self.message));
        self
    }

    /// Appends context to the body, `;`-joined to any existing context.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let addition = context.into();
        self.context = Some(match self.context.take() {
            Some(existing) => Cow::Owned(format!("{existing}; {addition}")),
            None => addition,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_and_contexts_accumulate() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("customer")
            .with_resource("image")
            .with_context("first")
            .with_context("second");

        assert_eq!(response.resource.as_deref(), Some("customer/image"));
        assert_eq!(response.context.as_deref(), Some("first; second"));
    }

    #[test]
    fn messages_append_as_sentences() {
        let response = ErrorResponse::CONFLICT.with_message("Pick a different username");

        assert_eq!(
            &response.message,
            "The request conflicts with existing data. \
             Pick a different username"
        );
    }

    #[test]
    fn body_omits_unset_fields_and_status() {
        let json = serde_json::to_string(&ErrorResponse::UNAUTHORIZED).unwrap();
        assert!(json.contains("\"name\""));
        assert!(json.contains("\"message\""));
        assert!(!json.contains("resource"));
        assert!(!json.contains("context"));
        assert!(!json.contains("status"));
    }
}
