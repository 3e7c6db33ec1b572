//! Repository traits for all database operations.

mod customer;

pub use crate::query::customer::CustomerRepository;
