//! JSON body extractor whose rejections map into the error taxonomy.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, OptionalFromRequest, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Wrapper around [`axum::Json`] that rejects with a typed [`Error`]
/// instead of axum's plain-text rejection, so malformed bodies produce the
/// same response shape as every other failure.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Wraps an already-deserialized value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Unwraps the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match <AxumJson<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl<T, S> OptionalFromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequest<S>>::from_request(req, state).await {
            Ok(json) => Ok(Some(json)),
            // A client-side problem just means "no body"; only server
            // errors propagate out of an optional extraction.
            Err(error) if error.kind() == ErrorKind::InternalServerError => Err(error),
            Err(_) => Ok(None),
        }
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Request body does not match the expected fields")
                .with_context(clip_detail(&err.to_string())),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Request body is not well-formed JSON")
                .with_context(clip_detail(&err.to_string())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Request must be sent with Content-Type: application/json"),
            JsonRejection::BytesRejection(err) => ErrorKind::BadRequest
                .with_message("Request body could not be read")
                .with_context(clip_detail(&err.to_string())),
            _ => ErrorKind::InternalServerError
                .with_message("Request body processing failed unexpectedly"),
        }
    }
}

/// Bounds rejection detail so a pathological body cannot inflate the
/// response; serde messages can quote large fragments of the input.
fn clip_detail(detail: &str) -> String {
    let mut clipped: String = detail.lines().next().unwrap_or_default().chars().take(200).collect();
    if clipped.len() < detail.len() {
        clipped.push_str("...");
    }
    clipped
}
