//! Database models for all tables.

mod customer;

pub use crate::model::customer::{Customer, NewCustomer, UpdateCustomer};
