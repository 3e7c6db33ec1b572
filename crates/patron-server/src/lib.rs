#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

/// Tracing target for authentication operations (token parsing and verification).
pub const TRACING_TARGET_AUTHENTICATION: &str = "patron_server::authentication";
