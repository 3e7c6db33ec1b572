//! Authentication response types.

use serde::{Deserialize, Serialize};

use super::Customer;

/// Response returned after successful registration.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Human-readable confirmation message.
    pub message: String,
    /// Signed bearer token for the new customer.
    pub token: String,
    /// Summary of the created customer (password hash excluded).
    pub customer: Customer,
}

/// Response returned after successful login.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Human-readable confirmation message.
    pub message: String,
    /// Summary of the authenticated customer (password hash excluded).
    pub customer: Customer,
    /// Signed bearer token for subsequent requests.
    pub token: String,
}
