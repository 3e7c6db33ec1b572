//! Shared database types.

mod constraints;

pub use crate::types::constraints::{ConstraintCategory, ConstraintViolation};
