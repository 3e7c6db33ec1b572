//! Customer summary type shared by all customer-bearing responses.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use patron_postgres::model;

/// Customer summary returned by the API.
///
/// Every response that carries a customer goes through this projection;
/// the password hash never leaves the store layer. The admin listing uses
/// the same type, so listed records are stripped as well.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: Uuid,
    /// Email address used for authentication.
    pub email: String,
    /// Unique handle chosen at registration.
    pub username: String,
    /// Contact phone number (optional).
    pub phone: Option<String>,
    /// Hosted profile image URL (optional).
    pub image: Option<String>,
    /// Timestamp when the customer registered.
    pub created_at: Timestamp,
}

impl Customer {
    /// Creates a new instance of [`Customer`] from the store model.
    pub fn from_model(customer: model::Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email_address,
            username: customer.username,
            phone: customer.phone_number,
            image: customer.avatar_url,
            created_at: customer.created_at.into(),
        }
    }
}

impl From<model::Customer> for Customer {
    fn from(customer: model::Customer) -> Self {
        Self::from_model(customer)
    }
}
