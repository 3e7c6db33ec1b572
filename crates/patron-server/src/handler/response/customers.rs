//! Admin listing response types.

use serde::{Deserialize, Serialize};

use super::Customer;

/// Response returned by the admin-only customer listing.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersResponse {
    /// Whether the listing succeeded.
    pub success: bool,
    /// Every customer record, projected through the summary type so
    /// password hashes are stripped.
    pub list: Vec<Customer>,
}
