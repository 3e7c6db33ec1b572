//! Secure password hashing and verification using bcrypt.
//!
//! Each hash embeds its own random salt, so hashing the same password twice
//! yields different strings that both verify. Verification never lets an
//! error escape: a malformed stored hash simply does not match.

use crate::handler::{ErrorKind, Result};

/// Tracing target for password hashing operations.
const TRACING_TARGET: &str = "patron_server::service::auth::hasher";

/// Fixed bcrypt cost factor (2^10 rounds).
const HASH_COST: u32 = 10;

/// A syntactically valid bcrypt hash that matches no real password.
///
/// Used to burn an equivalent verification when no account matched, so
/// login timing does not reveal whether an email exists.
const DUMMY_HASH: &str = "$2b$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Secure password hashing and verification service using bcrypt.
///
/// # Security Features
///
/// - Fixed cost factor of 10 rounds
/// - Cryptographically secure random salt per hash
/// - Verification treats any error as "does not match"
/// - Dummy verification keeps login timing flat for unknown accounts
///
/// # Example
///
/// ```rust
/// use patron_server::service::AuthHasher;
///
/// let hasher = AuthHasher::new();
/// let hash = hasher.hash_password("secure_password123")?;
/// assert!(hasher.verify_password("secure_password123", &hash));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthHasher;

impl AuthHasher {
    /// Creates a new password hashing service with the fixed cost factor.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a password using bcrypt with a random salt.
    ///
    /// The returned string embeds the algorithm version, cost factor, and
    /// salt, making it suitable for long-term storage in the store.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if the hashing operation
    /// fails; the password itself is never logged.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, HASH_COST).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "Password hashing operation failed"
            );

            ErrorKind::InternalServerError
                .with_message("Password processing failed")
                .with_resource("authentication")
        })
    }

    /// Verifies a password against a stored hash.
    ///
    /// Returns `true` iff the plaintext, salted per the hash's embedded
    /// salt, reproduces the stored hash. Any failure - including a
    /// malformed stored hash - returns `false`; errors never propagate
    /// past this boundary.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        match bcrypt::verify(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Password verification failed to parse stored hash"
                );
                false
            }
        }
    }

    /// Performs a dummy password verification to maintain consistent timing.
    ///
    /// Used when an account doesn't exist so login timing doesn't reveal
    /// which emails are registered. Performs real bcrypt work against a
    /// fixed hash and always returns `false`.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        let _ = bcrypt::verify(password, DUMMY_HASH);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = AuthHasher::new();
        let password = "secure_password_123";
        let hash = hasher.hash_password(password).map_err(|e| anyhow::anyhow!("{e}"))?;

        assert!(hash.starts_with("$2"));
        assert!(hasher.verify_password(password, &hash));
        assert!(!hasher.verify_password("wrong_password", &hash));

        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = AuthHasher::new();
        let password = "test_password";

        let hash1 = hasher.hash_password(password).map_err(|e| anyhow::anyhow!("{e}"))?;
        let hash2 = hasher.hash_password(password).map_err(|e| anyhow::anyhow!("{e}"))?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password(password, &hash1));
        assert!(hasher.verify_password(password, &hash2));

        Ok(())
    }

    #[test]
    fn hash_embeds_fixed_cost() -> anyhow::Result<()> {
        let hasher = AuthHasher::new();
        let hash = hasher.hash_password("password").map_err(|e| anyhow::anyhow!("{e}"))?;

        // bcrypt format: $2b$<cost>$<salt+digest>
        assert!(hash.contains("$10$"));
        Ok(())
    }

    #[test]
    fn verify_returns_false_for_malformed_hash() {
        let hasher = AuthHasher::new();
        assert!(!hasher.verify_password("password", "not_a_valid_hash"));
        assert!(!hasher.verify_password("password", ""));
    }

    #[test]
    fn dummy_verification_is_always_false() {
        let hasher = AuthHasher::new();
        assert!(!hasher.verify_dummy_password("password"));
        assert!(!hasher.verify_dummy_password(""));
    }
}
