//! Signing keys and default lifetime for authentication tokens.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey};

/// HS256 signing keys derived from the configuration-supplied shared secret,
/// plus the configured default token lifetime.
///
/// Constructed once at process start and injected into handlers through the
/// service state; business logic never reads the secret from the ambient
/// environment.
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<TokenKeysInner>,
}

struct TokenKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
}

impl TokenKeys {
    /// Creates signing keys from a shared secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - The shared signing secret. Development builds default to
    ///   a fixed non-secret placeholder; production deployments must supply
    ///   their own.
    /// * `default_ttl` - Default lifetime of login-issued tokens.
    pub fn from_secret(secret: &str, default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(TokenKeysInner {
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
                default_ttl,
            }),
        }
    }

    /// Returns the key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Returns the key used to verify token signatures.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the configured default token lifetime.
    #[inline]
    pub fn default_ttl(&self) -> Duration {
        self.inner.default_ttl
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("default_ttl", &self.inner.default_ttl)
            .finish_non_exhaustive()
    }
}
