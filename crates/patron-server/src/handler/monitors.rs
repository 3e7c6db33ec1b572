//! Health monitoring handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use patron_postgres::PgClient;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::HealthResponse;
use crate::service::ServiceState;

/// Liveness probe reporting pool statistics.
async fn health(State(pg_client): State<PgClient>) -> Result<(StatusCode, Json<HealthResponse>)> {
    let pool_status = pg_client.pool_status();

    let response = HealthResponse {
        status: "ok".to_owned(),
        pool_max_size: pool_status.max_size,
        pool_available: pool_status.available,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health))
}
