//! Admin-only customer listing.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use patron_postgres::PgClient;
use patron_postgres::query::CustomerRepository;

use crate::extract::{AuthState, Json};
use crate::handler::response::{Customer, ListCustomersResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for admin listing operations.
const TRACING_TARGET: &str = "patron_server::handler::customers";

/// Lists every customer record.
///
/// The route is already behind the admin gate; the claim is still checked
/// here independently so the handler stays safe even if it is ever mounted
/// without the gate.
#[tracing::instrument(skip_all)]
async fn list_customers(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
) -> Result<(StatusCode, Json<ListCustomersResponse>)> {
    if !auth_claims.is_admin {
        tracing::warn!(
            target: TRACING_TARGET,
            customer_id = %auth_claims.customer_id,
            "customer listing rejected: not an administrator"
        );
        return Err(ErrorKind::Forbidden
            .with_message("Administrator privileges required")
            .with_resource("customer"));
    }

    let mut conn = pg_client.get_connection().await?;
    let customers = conn.list_customers().await?;

    tracing::info!(
        target: TRACING_TARGET,
        customer_id = %auth_claims.customer_id,
        count = customers.len(),
        "customer listing retrieved"
    );

    let response = ListCustomersResponse {
        success: true,
        list: customers.into_iter().map(Customer::from_model).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/customer", get(list_customers))
}
