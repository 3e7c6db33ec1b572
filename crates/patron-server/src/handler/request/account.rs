//! Profile request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Partial profile update collected from the multipart form.
///
/// Absent fields are left untouched; a supplied password is re-hashed
/// before it reaches the store.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    /// New unique handle.
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,
    /// New email address.
    #[validate(email)]
    pub email: Option<String>,
    /// New contact phone number.
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    /// New password (hashed before storage).
    #[validate(length(min = 1))]
    pub password: Option<String>,
}

impl UpdateProfile {
    /// Returns whether no text field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_empty() {
        assert!(UpdateProfile::default().is_empty());

        let patch = UpdateProfile {
            phone: Some("+1-555-0123".to_owned()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_validates_supplied_fields_only() {
        let patch = UpdateProfile {
            email: Some("not-an-email".to_owned()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = UpdateProfile {
            phone: Some("+1-555-0123".to_owned()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
