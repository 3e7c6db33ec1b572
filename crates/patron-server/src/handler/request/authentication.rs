//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for registration.
///
/// All three fields are required; a missing field fails deserialization
/// and an empty one fails validation, both answering 400.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address of the new customer.
    #[validate(email)]
    pub email: String,
    /// Unique handle of the new customer.
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Password of the new customer.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address of the customer.
    #[validate(email)]
    pub email: String,
    /// Password of the customer.
    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_requires_all_fields() {
        let missing_password = serde_json::json!({
            "email": "user@example.com",
            "username": "user"
        });
        assert!(serde_json::from_value::<RegisterRequest>(missing_password).is_err());
    }

    #[test]
    fn register_request_rejects_empty_fields() {
        let request = RegisterRequest {
            email: "user@example.com".to_owned(),
            username: String::new(),
            password: "secret".to_owned(),
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            email: "not-an-email".to_owned(),
            username: "user".to_owned(),
            password: "secret".to_owned(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn login_request_accepts_valid_payload() {
        let request: LoginRequest = serde_json::from_value(serde_json::json!({
            "email": "user@example.com",
            "password": "secret"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }
}
