//! Bearer-token extraction and verification.
//!
//! [`AuthHeader`] reads the `Authorization: Bearer` header and verifies the
//! carried token in one step. The verified result is cached in the request's
//! extensions, so later extractors in the same request never re-verify.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;

use super::AuthClaims;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::TokenKeys;

/// A bearer token that passed signature, expiry, issuer, and audience
/// checks.
///
/// Extraction rejects with `missing_auth_token` when no Authorization
/// header is present, `malformed_auth_token` when the header or token
/// cannot be parsed, and `unauthorized` when verification fails. All three
/// answer 401.
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthHeader {
    auth_claims: AuthClaims,
}

impl AuthHeader {
    /// Wraps verified claims.
    #[inline]
    pub const fn new(claims: AuthClaims) -> Self {
        Self {
            auth_claims: claims,
        }
    }

    /// Borrows the verified claims.
    #[inline]
    pub const fn as_auth_claims(&self) -> &AuthClaims {
        &self.auth_claims
    }

    /// Consumes the header, returning the verified claims.
    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.auth_claims
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    TokenKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(cached) = parts.extensions.get::<Self>() {
            return Ok(cached.clone());
        }

        type BearerHeader = TypedHeader<Authorization<Bearer>>;
        let bearer = BearerHeader::from_request_parts(parts, state)
            .await
            .map_err(|rejection| match rejection.reason() {
                TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                    .with_message("Authentication required")
                    .with_resource("authentication"),
                TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                    .with_message("Authorization header must carry a Bearer token")
                    .with_resource("authentication"),
                _ => ErrorKind::InternalServerError
                    .with_message("Authorization header could not be processed")
                    .with_resource("authentication"),
            })?;

        let token_keys = TokenKeys::from_ref(state);
        let auth_claims = AuthClaims::from_header(bearer, token_keys.decoding_key())?;

        let auth_header = Self::new(auth_claims);
        parts.extensions.insert(auth_header.clone());
        Ok(auth_header)
    }
}
