//! Main customer model for PostgreSQL database operations.
//!
//! This module provides the core customer model for authentication and profile
//! management.
//!
//! ## Models
//!
//! - [`Customer`] - Main customer model with complete profile information
//! - [`NewCustomer`] - Data structure for creating new customer accounts
//! - [`UpdateCustomer`] - Data structure for partial customer updates

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::customers;

/// Main customer model representing a customer account in the system.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Customer {
    /// Unique customer identifier, assigned by the store on creation.
    pub id: Uuid,
    /// Administrative privileges across the entire system.
    pub is_admin: bool,
    /// Unique handle chosen at registration.
    pub username: String,
    /// Primary email for authentication (stored lowercased).
    pub email_address: String,
    /// Securely hashed password, never the raw secret.
    pub password_hash: String,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Optional URL to the profile image hosted by the image service.
    pub avatar_url: Option<String>,
    /// Timestamp when the customer was created; immutable thereafter.
    pub created_at: Timestamp,
    /// Timestamp when the customer was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new customer.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCustomer {
    /// Unique handle chosen at registration.
    pub username: String,
    /// Primary email for authentication.
    pub email_address: String,
    /// Securely hashed password.
    pub password_hash: String,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
}

/// Data for updating a customer.
///
/// Only fields set to `Some(value)` are written; `None` fields are left
/// untouched (partial update semantics).
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateCustomer {
    /// Unique handle.
    pub username: Option<String>,
    /// Primary email for authentication.
    pub email_address: Option<String>,
    /// Securely hashed password.
    pub password_hash: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// URL to the profile image.
    pub avatar_url: Option<String>,
}

impl Customer {
    /// Returns whether the customer has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns whether the customer has a phone number set.
    pub fn has_phone_number(&self) -> bool {
        self.phone_number
            .as_deref()
            .is_some_and(|phone_number| !phone_number.is_empty())
    }

    /// Returns whether the customer has a profile image configured.
    pub fn has_avatar(&self) -> bool {
        self.avatar_url.is_some()
    }
}

impl UpdateCustomer {
    /// Returns whether this changeset writes no fields at all.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email_address.is_none()
            && self.password_hash.is_none()
            && self.phone_number.is_none()
            && self.avatar_url.is_none()
    }
}
