//! Response payload types for all handlers.

mod account;
mod authentication;
mod customer;
mod customers;
mod error_response;
mod monitors;

pub use account::{DeleteProfileResponse, GetProfileResponse, UpdateProfileResponse};
pub use authentication::{LoginResponse, RegisterResponse};
pub use customer::Customer;
pub use customers::ListCustomersResponse;
pub use error_response::ErrorResponse;
pub use monitors::HealthResponse;
