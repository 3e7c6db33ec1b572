//! Customer repository for managing customer accounts.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Customer, NewCustomer, UpdateCustomer};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for customer database operations.
///
/// Handles the customer lifecycle: registration, credential lookup, profile
/// updates, and deletion. Uniqueness of email and username is ultimately
/// guaranteed by the unique indexes; [`identity_exists`] only exists to
/// produce a friendlier error before the insert races.
///
/// [`identity_exists`]: CustomerRepository::identity_exists
pub trait CustomerRepository {
    /// Creates a new customer account.
    ///
    /// Inserts a new customer record with the provided details. The profile
    /// image is always absent on creation.
    fn create_customer(
        &mut self,
        new_customer: NewCustomer,
    ) -> impl Future<Output = PgResult<Customer>> + Send;

    /// Finds a customer by its unique identifier.
    fn find_customer_by_id(
        &mut self,
        customer_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Customer>>> + Send;

    /// Finds a customer by email address.
    ///
    /// Retrieves a customer using its email for authentication and lookup.
    /// Email comparison is case-insensitive.
    fn find_customer_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<Customer>>> + Send;

    /// Checks whether a customer with the given email OR username exists.
    ///
    /// Used during registration to reject duplicate identities with a single
    /// combined existence check.
    fn identity_exists(
        &mut self,
        email: &str,
        username: &str,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Updates a customer with new information.
    ///
    /// Applies partial updates to an existing customer. Only fields set
    /// to `Some(value)` will be modified. Returns `None` if the customer
    /// was not found.
    fn update_customer(
        &mut self,
        customer_id: Uuid,
        updates: UpdateCustomer,
    ) -> impl Future<Output = PgResult<Option<Customer>>> + Send;

    /// Deletes a customer record.
    ///
    /// Removes the record entirely. Returns `None` if the customer was not
    /// found, so a repeated delete reports the absence instead of failing.
    fn delete_customer(
        &mut self,
        customer_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Customer>>> + Send;

    /// Lists every customer record, most recently created first.
    fn list_customers(&mut self) -> impl Future<Output = PgResult<Vec<Customer>>> + Send;
}

impl CustomerRepository for PgConnection {
    async fn create_customer(&mut self, mut new_customer: NewCustomer) -> PgResult<Customer> {
        use schema::customers;

        // Normalize fields: trim whitespace, lowercase the email
        new_customer.username = new_customer.username.trim().to_owned();
        new_customer.email_address = new_customer.email_address.trim().to_lowercase();

        diesel::insert_into(customers::table)
            .values(&new_customer)
            .returning(Customer::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_customer_by_id(&mut self, customer_id: Uuid) -> PgResult<Option<Customer>> {
        use schema::customers::{self, dsl};

        customers::table
            .filter(dsl::id.eq(customer_id))
            .select(Customer::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_customer_by_email(&mut self, email: &str) -> PgResult<Option<Customer>> {
        use schema::customers::{self, dsl};

        customers::table
            .filter(dsl::email_address.eq(email.trim().to_lowercase()))
            .select(Customer::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn identity_exists(&mut self, email: &str, username: &str) -> PgResult<bool> {
        use schema::customers::{self, dsl};

        let count: i64 = customers::table
            .filter(
                dsl::email_address
                    .eq(email.trim().to_lowercase())
                    .or(dsl::username.eq(username.trim())),
            )
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn update_customer(
        &mut self,
        customer_id: Uuid,
        mut updates: UpdateCustomer,
    ) -> PgResult<Option<Customer>> {
        use schema::customers::{self, dsl};

        // Normalize fields: trim whitespace, lowercase the email
        if let Some(username) = updates.username.as_mut() {
            *username = username.trim().to_owned();
        }
        if let Some(email) = updates.email_address.as_mut() {
            *email = email.trim().to_lowercase();
        }

        diesel::update(customers::table.filter(dsl::id.eq(customer_id)))
            .set(&updates)
            .returning(Customer::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_customer(&mut self, customer_id: Uuid) -> PgResult<Option<Customer>> {
        use schema::customers::{self, dsl};

        diesel::delete(customers::table.filter(dsl::id.eq(customer_id)))
            .returning(Customer::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_customers(&mut self) -> PgResult<Vec<Customer>> {
        use schema::customers::{self, dsl};

        customers::table
            .order(dsl::created_at.desc())
            .select(Customer::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
