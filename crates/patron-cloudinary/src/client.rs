//! Upload client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use sha2::{Digest, Sha256};

use crate::types::ApiErrorBody;
use crate::{CloudinaryConfig, Error, Result, TRACING_TARGET, UploadedImage};

/// Inner client that holds the HTTP client and configuration.
struct CloudinaryClientInner {
    http: Client,
    config: CloudinaryConfig,
}

impl std::fmt::Debug for CloudinaryClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Client for uploading image buffers to the Cloudinary-hosted image service.
///
/// The client is a cheap handle around a shared HTTP connection pool and can
/// be cloned freely across request handlers.
///
/// # Examples
///
/// ```rust,ignore
/// use patron_cloudinary::{CloudinaryClient, CloudinaryConfig};
///
/// let config = CloudinaryConfig::new("demo", "key", "secret");
/// let client = CloudinaryClient::new(config)?;
///
/// let uploaded = client.upload_image(bytes, "customer_profiles").await?;
/// println!("hosted at {}", uploaded.secure_url);
/// ```
#[derive(Clone, Debug)]
pub struct CloudinaryClient {
    inner: Arc<CloudinaryClientInner>,
}

impl CloudinaryClient {
    /// Creates a new upload client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: CloudinaryConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            cloud_name = %config.cloud_name,
            timeout_ms = config.timeout().as_millis(),
            "Creating upload client"
        );

        config.validate()?;

        let http = Client::builder().timeout(config.timeout()).build()?;

        let inner = CloudinaryClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &CloudinaryConfig {
        &self.inner.config
    }

    /// Uploads an image buffer under the given folder tag.
    ///
    /// Returns the hosted image, whose `secure_url` is a fully-qualified
    /// HTTPS URL suitable for storing on a customer profile.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails, times out, or the API
    /// answers with a non-success status.
    pub async fn upload_image(&self, image: Vec<u8>, folder: &str) -> Result<UploadedImage> {
        let started_at = Instant::now();
        let timestamp = jiff::Timestamp::now().as_second();
        let signature = Self::sign_request(&self.inner.config.api_secret, folder, timestamp);

        tracing::debug!(
            target: TRACING_TARGET,
            folder = %folder,
            image_bytes = image.len(),
            "Uploading image"
        );

        let form = Form::new()
            .part("file", Part::bytes(image).file_name("upload"))
            .text("api_key", self.inner.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder.to_owned())
            .text("signature", signature);

        let response = self
            .inner
            .http
            .post(self.inner.config.image_upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let elapsed = started_at.elapsed();

        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("HTTP {}", status.as_u16()),
            };

            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                error = %message,
                elapsed_ms = elapsed.as_millis(),
                "Image upload failed"
            );

            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded = response.json::<UploadedImage>().await?;

        tracing::info!(
            target: TRACING_TARGET,
            public_id = %uploaded.public_id,
            secure_url = %uploaded.secure_url,
            elapsed_ms = elapsed.as_millis(),
            "Image upload completed"
        );

        Ok(uploaded)
    }

    /// Signs an upload request using SHA-256.
    ///
    /// The signature is computed over the alphabetically-ordered request
    /// parameters followed by the API secret:
    /// `folder={folder}&timestamp={timestamp}{api_secret}`.
    fn sign_request(api_secret: &str, folder: &str, timestamp: i64) -> String {
        let signing_input = format!("folder={}&timestamp={}{}", folder, timestamp, api_secret);

        let mut hasher = Sha256::new();
        hasher.update(signing_input.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_request_is_deterministic() {
        let a = CloudinaryClient::sign_request("secret", "customer_profiles", 1234567890);
        let b = CloudinaryClient::sign_request("secret", "customer_profiles", 1234567890);

        // SHA-256 hex digest is 64 chars
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, b);
    }

    #[test]
    fn sign_request_varies_with_inputs() {
        let base = CloudinaryClient::sign_request("secret", "customer_profiles", 1234567890);
        assert_ne!(
            base,
            CloudinaryClient::sign_request("other", "customer_profiles", 1234567890)
        );
        assert_ne!(
            base,
            CloudinaryClient::sign_request("secret", "customer_profiles", 1234567891)
        );
        assert_ne!(base, CloudinaryClient::sign_request("secret", "avatars", 1234567890));
    }

    #[test]
    fn client_creation() {
        let config = CloudinaryConfig::new("demo", "key", "secret");
        assert!(CloudinaryClient::new(config).is_ok());

        let invalid = CloudinaryConfig::new("", "key", "secret");
        assert!(CloudinaryClient::new(invalid).is_err());
    }
}
