//! Path parameter extractor whose rejections map into the error taxonomy.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, OptionalFromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Wrapper around [`axum::extract::Path`] that rejects with a typed
/// [`Error`], so an unparsable `:id` answers with the same body shape as
/// every other 400.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Wraps already-extracted path parameters.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Unwraps the inner parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(AxumPath(params)) => Ok(Self(params)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl<T, S> OptionalFromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AxumPath<T> as OptionalFromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(params) => Ok(params.map(|AxumPath(p)| Self(p))),
            // Missing or unparsable parameters mean "not present" here;
            // only server errors propagate out of an optional extraction.
            Err(
                PathRejection::FailedToDeserializePathParams(_)
                | PathRejection::MissingPathParams(_),
            ) => Ok(None),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => ErrorKind::BadRequest
                .with_message("A path parameter has the wrong format")
                .with_context(err.to_string()),
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_message("A required path parameter is missing")
                .with_context(err.to_string()),
            _ => ErrorKind::InternalServerError
                .with_message("Path parameter processing failed unexpectedly"),
        }
    }
}
