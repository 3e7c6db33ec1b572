#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod types;

pub use crate::client::CloudinaryClient;
pub use crate::config::CloudinaryConfig;
pub use crate::error::{Error, Result};
pub use crate::types::UploadedImage;

/// Tracing target for upload client operations.
pub const TRACING_TARGET: &str = "patron_cloudinary::upload";
