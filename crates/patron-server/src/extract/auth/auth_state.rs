//! Verified identity context for request handling.
//!
//! [`AuthState`] is the per-request identity context: the decoded, verified
//! claim set attached after the authentication gate succeeds. Verification
//! is stateless - there is no server-side session store to consult - so a
//! token is trusted until its embedded expiry elapses or its signature
//! fails.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;

use super::{AuthClaims, AuthHeader};
use crate::handler::{Error, Result};
use crate::service::TokenKeys;

/// Verified identity of the requesting customer.
///
/// When [`AuthState`] extraction succeeds, the request carries a
/// cryptographically valid, unexpired token, and the wrapped claims are
/// read-only for the remainder of request handling. Handlers read the
/// subject via `customer_id`.
///
/// Extraction fails with:
/// - [`ErrorKind::MissingAuthToken`] when no Authorization header is present
/// - [`ErrorKind::MalformedAuthToken`] when the token cannot be parsed
/// - [`ErrorKind::Unauthorized`] when the signature or expiry check fails
///
/// [`ErrorKind::MissingAuthToken`]: crate::handler::ErrorKind::MissingAuthToken
/// [`ErrorKind::MalformedAuthToken`]: crate::handler::ErrorKind::MalformedAuthToken
/// [`ErrorKind::Unauthorized`]: crate::handler::ErrorKind::Unauthorized
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Creates a new [`AuthState`] from verified claims.
    #[inline]
    #[must_use]
    pub const fn from_verified_claims(auth_claims: AuthClaims) -> Self {
        Self(auth_claims)
    }

    /// Returns the wrapped claims.
    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    TokenKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Check for cached auth state to avoid repeated verification
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let auth_state = Self::from_verified_claims(auth_header.into_auth_claims());

        // Cache the verified state for subsequent extractors in the same request
        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    TokenKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(auth_state) => Ok(Some(auth_state)),
            Err(_) => Ok(None),
        }
    }
}
