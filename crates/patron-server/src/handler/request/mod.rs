//! Request payload types for all handlers.

mod account;
mod authentication;

pub use account::UpdateProfile;
pub use authentication::{LoginRequest, RegisterRequest};
