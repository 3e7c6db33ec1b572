//! JWT claims for authentication tokens.
//!
//! Tokens are signed with HS256 over a configuration-supplied shared secret
//! and verified stateless: there is no server-side session record, so a
//! token stays valid until its embedded expiry elapses or its signature
//! fails verification.

use std::time::Duration;

use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use patron_postgres::model::Customer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};

/// JWT claims for authentication tokens.
///
/// This structure contains both RFC 7519 standard JWT claims and the
/// patron-specific identity claims.
///
/// # Standard JWT Claims
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `iss` | `issued_by` | Token issuer identifier |
/// | `aud` | `audience` | Token audience identifier |
/// | `iat` | `issued_at` | Token creation timestamp (unix seconds) |
/// | `exp` | `expires_at` | Token expiration timestamp (unix seconds) |
///
/// # Application-Specific Claims
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `customer_id` | `customer_id` | Customer this token represents |
/// | `email` | `email` | Customer email address |
/// | `username` | `username` | Customer handle (login tokens only) |
/// | `phone` | `phone` | Contact phone number (login tokens only) |
/// | `image` | `image` | Profile image URL (login tokens only) |
/// | `is_admin` | `is_admin` | Administrative privileges |
///
/// The subject is always serialized under `customer_id` - the exact claim
/// name downstream request handling reads. Registration tokens simply omit
/// the optional profile claims; `is_admin` defaults to false when absent.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    // Standard (or registered) claims.
    /// Issuer (who created the token).
    #[serde(rename = "iss")]
    issued_by: String,
    /// Audience (who the token is intended for).
    #[serde(rename = "aud")]
    audience: String,

    /// Subject ID (unique identifier of the associated customer).
    pub customer_id: Uuid,

    /// Issued at (as unix seconds).
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration time (as unix seconds).
    #[serde(rename = "exp")]
    pub expires_at: i64,

    // Private (or custom) claims
    /// Email address of the customer.
    pub email: String,
    /// Username of the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Contact phone number of the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Profile image URL of the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Is administrator flag.
    #[serde(default)]
    pub is_admin: bool,
}

impl AuthClaims {
    /// Default JWT audience identifier for authentication tokens.
    const JWT_AUDIENCE: &str = "patron:server";
    /// Default JWT issuer identifier for authentication tokens.
    const JWT_ISSUER: &str = "patron";
    /// Fixed lifetime of registration-issued tokens (7 days).
    ///
    /// Login tokens use the configured default instead; the asymmetry is
    /// deliberate and covered by tests.
    pub const REGISTRATION_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    /// Creates the claims minted at registration.
    ///
    /// Carries only the subject and email; the optional profile claims are
    /// omitted. The lifetime is the fixed [`Self::REGISTRATION_TOKEN_TTL`].
    pub fn registration(customer: &Customer) -> Self {
        let issued_at = jiff::Timestamp::now().as_second();
        Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            customer_id: customer.id,
            issued_at,
            expires_at: issued_at + Self::REGISTRATION_TOKEN_TTL.as_secs() as i64,
            email: customer.email_address.clone(),
            username: None,
            phone: None,
            image: None,
            is_admin: customer.is_admin,
        }
    }

    /// Creates the full claim set minted at login.
    ///
    /// # Arguments
    ///
    /// * `customer` - The authenticated customer
    /// * `ttl` - Token lifetime, normally the configured default
    pub fn authenticated(customer: &Customer, ttl: Duration) -> Self {
        let issued_at = jiff::Timestamp::now().as_second();
        Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            customer_id: customer.id,
            issued_at,
            expires_at: issued_at + ttl.as_secs() as i64,
            email: customer.email_address.clone(),
            username: Some(customer.username.clone()),
            phone: customer.phone_number.clone(),
            image: customer.avatar_url.clone(),
            is_admin: customer.is_admin,
        }
    }

    /// Checks if the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= jiff::Timestamp::now().as_second()
    }

    /// Returns the remaining lifetime of this token.
    ///
    /// The duration until expiration, or zero if already expired.
    #[inline]
    #[must_use]
    pub fn remaining_lifetime(&self) -> Duration {
        let remaining = self.expires_at - jiff::Timestamp::now().as_second();
        Duration::from_secs(remaining.max(0) as u64)
    }

    /// Encodes the claims into a signed, URL-safe token string.
    ///
    /// # Errors
    ///
    /// Returns an internal error if JWT encoding fails.
    pub fn into_token(self, encoding_key: &EncodingKey) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, &self, encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                customer_id = %self.customer_id,
                "Failed to encode JWT token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_resource("authentication")
        })
    }

    /// Parses and validates a JWT token from an Authorization header.
    ///
    /// Verification covers:
    /// - Signature integrity (HS256 over the shared secret)
    /// - Standard JWT claims (iss, aud, exp)
    /// - Expiration with detailed logging
    ///
    /// # Errors
    ///
    /// Returns the internally distinct authentication failures: expired or
    /// forged tokens as `Unauthorized`, unparsable ones as
    /// `MalformedAuthToken`. All answer 401 at the HTTP boundary.
    pub fn from_header(
        auth_header: TypedHeader<Authorization<Bearer>>,
        decoding_key: &DecodingKey,
    ) -> Result<Self> {
        let auth_token = auth_header.token();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = true;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "iat", "exp"]);

        let token_data = decode::<Self>(auth_token, decoding_key, &validation)?;
        let claims = token_data.claims;

        // Double-check expiration against our own clock
        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                customer_id = %claims.customer_id,
                expires_at = claims.expires_at,
                "JWT token validation failed: token expired"
            );

            return Err(ErrorKind::Unauthorized
                .with_message("Authentication session has expired")
                .with_context("Please sign in again to continue"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            customer_id = %claims.customer_id,
            is_admin = claims.is_admin,
            remaining = ?claims.remaining_lifetime(),
            "JWT token validation completed successfully"
        );

        Ok(claims)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                .with_message("Your session has expired")
                .with_context("Please sign in again to continue"),
            JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Authentication token verification failed")
                .with_context("Token signature could not be verified"),
            JwtErrorKind::InvalidAudience => ErrorKind::Unauthorized
                .with_message("Authentication token is not valid for this service")
                .with_context("Token was issued for a different application"),
            JwtErrorKind::InvalidIssuer => ErrorKind::Unauthorized
                .with_message("Authentication token is from an untrusted source")
                .with_context("Token was not issued by this authentication system"),
            JwtErrorKind::InvalidToken => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is invalid")
                .with_context("The provided token format is unrecognized"),
            JwtErrorKind::InvalidAlgorithm => ErrorKind::MalformedAuthToken
                .with_message("Authentication token uses unsupported format")
                .with_context("Token was signed with an incompatible algorithm"),
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is incomplete")
                .with_context(format!("Token is missing required field: {}", claim)),
            JwtErrorKind::Base64(_) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token format is corrupted")
                .with_context("Token contains invalid base64 encoding"),
            JwtErrorKind::Json(_) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token structure is invalid")
                .with_context("Token payload contains malformed data"),
            _ => ErrorKind::InternalServerError
                .with_message("Authentication processing failed")
                .with_context("An unexpected error occurred during token validation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff_diesel::Timestamp;

    use super::*;
    use crate::service::TokenKeys;

    fn test_customer() -> Customer {
        let now = Timestamp::from(jiff::Timestamp::now());
        Customer {
            id: Uuid::new_v4(),
            is_admin: false,
            username: "testuser".to_owned(),
            email_address: "test@example.com".to_owned(),
            password_hash: "$2b$10$hash".to_owned(),
            phone_number: Some("+1-555-0123".to_owned()),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn bearer(token: &str) -> TypedHeader<Authorization<Bearer>> {
        TypedHeader(Authorization::bearer(token).unwrap())
    }

    #[test]
    fn token_round_trip() -> anyhow::Result<()> {
        let keys = TokenKeys::from_secret("test-secret", Duration::from_secs(3600));
        let customer = test_customer();

        let claims = AuthClaims::authenticated(&customer, Duration::from_secs(3600));
        let token = claims.clone().into_token(keys.encoding_key())?;

        let decoded = AuthClaims::from_header(bearer(&token), keys.decoding_key())
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        assert_eq!(decoded, claims);
        assert_eq!(decoded.customer_id, customer.id);
        assert_eq!(decoded.username.as_deref(), Some("testuser"));
        Ok(())
    }

    #[test]
    fn registration_claims_omit_profile_fields() -> anyhow::Result<()> {
        let keys = TokenKeys::from_secret("test-secret", Duration::from_secs(3600));
        let customer = test_customer();

        let token = AuthClaims::registration(&customer).into_token(keys.encoding_key())?;
        let decoded = AuthClaims::from_header(bearer(&token), keys.decoding_key())
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        // The subject still arrives under the customer_id claim
        assert_eq!(decoded.customer_id, customer.id);
        assert_eq!(decoded.email, "test@example.com");
        assert_eq!(decoded.username, None);
        assert_eq!(decoded.phone, None);
        assert!(!decoded.is_admin);
        Ok(())
    }

    #[test]
    fn tampered_token_is_rejected() -> anyhow::Result<()> {
        let keys = TokenKeys::from_secret("test-secret", Duration::from_secs(3600));
        let other_keys = TokenKeys::from_secret("other-secret", Duration::from_secs(3600));
        let customer = test_customer();

        let token =
            AuthClaims::authenticated(&customer, Duration::from_secs(3600)).into_token(keys.encoding_key())?;

        let result = AuthClaims::from_header(bearer(&token), other_keys.decoding_key());
        let error = result.expect_err("token signed with a different secret must fail");
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn garbage_token_is_malformed() {
        let keys = TokenKeys::from_secret("test-secret", Duration::from_secs(3600));

        let result = AuthClaims::from_header(bearer("not-a-jwt"), keys.decoding_key());
        let error = result.expect_err("garbage must fail verification");
        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
    }

    #[test]
    fn expired_token_is_unauthorized_even_with_valid_signature() -> anyhow::Result<()> {
        let keys = TokenKeys::from_secret("test-secret", Duration::from_secs(3600));
        let customer = test_customer();

        let mut claims = AuthClaims::authenticated(&customer, Duration::from_secs(3600));
        claims.issued_at -= 7200;
        claims.expires_at = claims.issued_at + 60;

        let token = claims.into_token(keys.encoding_key())?;
        let result = AuthClaims::from_header(bearer(&token), keys.decoding_key());

        let error = result.expect_err("expired token must be rejected");
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn registration_ttl_is_seven_days() {
        let customer = test_customer();
        let claims = AuthClaims::registration(&customer);
        assert_eq!(
            claims.expires_at - claims.issued_at,
            AuthClaims::REGISTRATION_TOKEN_TTL.as_secs() as i64
        );
    }
}
