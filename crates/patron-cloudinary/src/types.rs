//! Response types for the upload API.

use serde::{Deserialize, Serialize};

/// A successfully hosted image.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Fully-qualified HTTPS URL of the hosted image.
    pub secure_url: String,
    /// Host-assigned identifier of the uploaded asset.
    pub public_id: String,
    /// Size of the stored asset in bytes.
    #[serde(default)]
    pub bytes: u64,
    /// Detected image format (e.g. "png").
    #[serde(default)]
    pub format: Option<String>,
}

/// Error body returned by the upload API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorMessage {
    pub message: String,
}
