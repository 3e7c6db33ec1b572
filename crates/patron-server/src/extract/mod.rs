//! HTTP request extractors with improved error handling and validation.
//!
//! # Extractor Categories
//!
//! ## Authentication & Authorization
//!
//! - [`AuthHeader`] - bearer-token extraction and verification
//! - [`AuthClaims`] - token claims with application-specific fields
//! - [`AuthState`] - verified per-request identity context
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - JSON deserialization with better error messages
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Path`] - path parameter extraction with detailed error context

// Authentication and Authorization
pub mod auth;

// Request Data Extraction
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState};
pub use crate::extract::reject::{Json, Path, ValidateJson};
