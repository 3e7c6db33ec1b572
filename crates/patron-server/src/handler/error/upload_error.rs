//! Maps image-hosting errors to HTTP errors.

use crate::handler::{Error, ErrorKind};

impl From<patron_cloudinary::Error> for Error<'static> {
    fn from(error: patron_cloudinary::Error) -> Self {
        if error.is_timeout() {
            tracing::warn!(error = %error, "image upload timed out");
        } else {
            tracing::error!(error = %error, "image upload failed");
        }

        ErrorKind::InternalServerError
            .with_message("Image upload failed. Please try again later")
            .with_resource("image")
    }
}
