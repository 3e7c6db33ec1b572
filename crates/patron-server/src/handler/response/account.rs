//! Profile response types.

use serde::{Deserialize, Serialize};

use super::Customer;

/// Response returned when retrieving the authenticated profile.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfileResponse {
    /// Profile of the authenticated customer.
    pub customer: Customer,
}

/// Response returned after updating a profile.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    /// Human-readable confirmation message.
    pub message: String,
    /// Updated profile (password hash excluded).
    pub customer: Customer,
}

/// Response returned after deleting a profile.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProfileResponse {
    /// Human-readable confirmation message.
    pub message: String,
}
