//! Upload client configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default request timeout for upload calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Default Cloudinary API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

/// Configuration for the Cloudinary upload client.
///
/// The API secret is used to sign upload requests with SHA-256; the
/// Cloudinary account must be configured for SHA-256 signatures.
#[derive(Clone, Serialize, Deserialize)]
#[must_use = "configs do nothing unless used to create a client"]
pub struct CloudinaryConfig {
    /// Cloud name identifying the Cloudinary account.
    pub cloud_name: String,
    /// API key of the account.
    pub api_key: String,
    /// API secret used for request signing.
    pub api_secret: String,
    /// Base URL of the upload API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl CloudinaryConfig {
    /// Creates a new configuration for the given account credentials.
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }

    /// Overrides the upload API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Returns the request timeout as a Duration.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the full upload endpoint for image uploads.
    pub fn image_upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cloud_name.is_empty() {
            return Err(Error::Config("cloud_name cannot be empty".into()));
        }
        if self.api_key.is_empty() {
            return Err(Error::Config("api_key cannot be empty".into()));
        }
        if self.api_secret.is_empty() {
            return Err(Error::Config("api_secret cannot be empty".into()));
        }
        if self.base_url.parse::<url::Url>().is_err() {
            return Err(Error::Config(format!(
                "base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".into()));
        }

        Ok(())
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_includes_cloud_name() {
        let config = CloudinaryConfig::new("demo", "key", "secret");
        assert_eq!(
            config.image_upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn validation_rejects_empty_fields() {
        assert!(CloudinaryConfig::new("demo", "key", "secret").validate().is_ok());
        assert!(CloudinaryConfig::new("", "key", "secret").validate().is_err());
        assert!(CloudinaryConfig::new("demo", "", "secret").validate().is_err());
        assert!(CloudinaryConfig::new("demo", "key", "").validate().is_err());

        let bad_url = CloudinaryConfig::new("demo", "key", "secret").with_base_url("not a url");
        assert!(bad_url.validate().is_err());

        let zero_timeout = CloudinaryConfig::new("demo", "key", "secret").with_timeout_secs(0);
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn debug_masks_secret() {
        let config = CloudinaryConfig::new("demo", "key", "super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }
}
