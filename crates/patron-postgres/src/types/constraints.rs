//! Customers table constraint violations.
//!
//! Serialized names match the constraint and index names declared in the
//! migrations, so violations reported by Postgres can be parsed back into
//! typed values.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Customers table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    // Customer validation constraints
    #[strum(serialize = "customers_username_not_empty")]
    UsernameNotEmpty,
    #[strum(serialize = "customers_email_format")]
    EmailFormat,
    #[strum(serialize = "customers_password_hash_not_empty")]
    PasswordHashNotEmpty,

    // Customer chronological constraints
    #[strum(serialize = "customers_updated_after_created")]
    UpdatedAfterCreated,

    // Customer unique constraints
    #[strum(serialize = "customers_email_address_unique_idx")]
    EmailAddressUnique,
    #[strum(serialize = "customers_username_unique_idx")]
    UsernameUnique,
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, emptiness checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (duplicate identity fields).
    Unique,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::UsernameNotEmpty
            | ConstraintViolation::EmailFormat
            | ConstraintViolation::PasswordHashNotEmpty => ConstraintCategory::Validation,

            ConstraintViolation::UpdatedAfterCreated => ConstraintCategory::Chronological,

            ConstraintViolation::EmailAddressUnique | ConstraintViolation::UsernameUnique => {
                ConstraintCategory::Unique
            }
        }
    }

    /// Returns whether this violation reports a duplicate identity field.
    pub fn is_unique_violation(&self) -> bool {
        self.categorize() == ConstraintCategory::Unique
    }
}

impl From<ConstraintViolation> for String {
    fn from(value: ConstraintViolation) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn constraint_names_round_trip() {
        for violation in ConstraintViolation::iter() {
            let name = violation.to_string();
            assert_eq!(ConstraintViolation::new(&name), Some(violation));
        }
    }

    #[test]
    fn unknown_constraint_is_none() {
        assert_eq!(ConstraintViolation::new("customers_unknown_constraint"), None);
    }

    #[test]
    fn unique_indexes_are_unique_violations() {
        assert!(ConstraintViolation::EmailAddressUnique.is_unique_violation());
        assert!(ConstraintViolation::UsernameUnique.is_unique_violation());
        assert!(!ConstraintViolation::EmailFormat.is_unique_violation());
    }
}
