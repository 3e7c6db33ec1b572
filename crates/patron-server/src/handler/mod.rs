//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Route surface:
//!
//! | Method | Path | Gate |
//! |---|---|---|
//! | POST | `/register` | none |
//! | POST | `/login` | none |
//! | GET | `/health` | none |
//! | GET | `/profile` | authentication |
//! | PUT | `/profile/{id}` | authentication |
//! | DELETE | `/profile/{id}` | authentication |
//! | GET | `/customer` | authentication + admin |
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod authentication;
mod customers;
mod error;
mod monitors;
pub mod request;
pub mod response;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::middleware::{require_admin, require_authentication};
use crate::service::ServiceState;

/// Maximum request body size for profile updates (image included): 8MB.
const MAX_UPDATE_BODY_SIZE: usize = 8 * 1024 * 1024;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes requiring authentication.
fn private_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(accounts::routes())
        .layer(DefaultBodyLimit::max(MAX_UPDATE_BODY_SIZE))
        .route_layer(from_fn_with_state(state, require_authentication))
}

/// Returns a [`Router`] with all routes additionally requiring the admin claim.
fn admin_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(customers::routes())
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state, require_authentication))
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .merge(authentication::routes())
        .merge(monitors::routes())
}

/// Returns a [`Router`] with all routes.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(private_routes(state.clone()))
        .merge(admin_routes(state))
        .merge(public_routes())
        .fallback(fallback)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum_test::TestServer;
    use jiff_diesel::Timestamp;
    use patron_postgres::PgConfig;
    use patron_postgres::model::Customer;
    use uuid::Uuid;

    use crate::extract::AuthClaims;
    use crate::middleware::{require_admin, require_authentication};
    use crate::service::{ServiceConfig, ServiceState, TokenKeys};

    /// Returns state whose store pool is lazy: no database is contacted
    /// unless a handler actually runs a query.
    fn create_test_state(config: &ServiceConfig) -> anyhow::Result<ServiceState> {
        let pg_client = PgConfig::new(config.postgres_url.clone()).build()?;
        let image_client = config.create_image_client()?;
        let auth_hasher = config.create_password_hasher();
        let token_keys = config.token_keys();

        Ok(ServiceState::new(
            pg_client,
            image_client,
            auth_hasher,
            token_keys,
        ))
    }

    fn test_customer(is_admin: bool) -> Customer {
        let now = Timestamp::from(jiff::Timestamp::now());
        Customer {
            id: Uuid::new_v4(),
            is_admin,
            username: "testuser".to_owned(),
            email_address: "test@example.com".to_owned(),
            password_hash: "$2b$10$hash".to_owned(),
            phone_number: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn bearer_for(keys: &TokenKeys, customer: &Customer) -> anyhow::Result<String> {
        let claims = AuthClaims::authenticated(customer, keys.default_ttl());
        let token = claims
            .into_token(keys.encoding_key())
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(format!("Bearer {token}"))
    }

    async fn pong() -> &'static str {
        "pong"
    }

    /// Gated echo routes exercise both gates without touching the store.
    fn create_gated_server(state: ServiceState) -> anyhow::Result<TestServer> {
        let protected = Router::new()
            .route("/ping", get(pong))
            .route_layer(from_fn_with_state(state.clone(), require_authentication));
        let admin = Router::new()
            .route("/admin-ping", get(pong))
            .route_layer(from_fn_with_state(state.clone(), require_admin))
            .route_layer(from_fn_with_state(state.clone(), require_authentication));

        let app = protected.merge(admin).with_state(state);
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() -> anyhow::Result<()> {
        let config = ServiceConfig::default();
        let server = create_gated_server(create_test_state(&config)?)?;

        let response = server.get("/ping").await;
        response.assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn valid_token_passes_the_gate() -> anyhow::Result<()> {
        let config = ServiceConfig::default();
        let state = create_test_state(&config)?;
        let server = create_gated_server(state)?;

        let header = bearer_for(&config.token_keys(), &test_customer(false))?;
        let response = server.get("/ping").add_header("Authorization", &header).await;
        response.assert_status_ok();
        response.assert_text("pong");

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() -> anyhow::Result<()> {
        let config = ServiceConfig::default();
        let server = create_gated_server(create_test_state(&config)?)?;

        let response = server
            .get("/ping")
            .add_header("Authorization", "Bearer not-a-token")
            .await;
        response.assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() -> anyhow::Result<()> {
        let config = ServiceConfig::default();
        let keys = config.token_keys();
        let server = create_gated_server(create_test_state(&config)?)?;

        let mut claims = AuthClaims::authenticated(&test_customer(false), Duration::from_secs(60));
        claims.issued_at -= 7200;
        claims.expires_at = claims.issued_at + 60;
        let token = claims
            .into_token(keys.encoding_key())
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        let response = server
            .get("/ping")
            .add_header("Authorization", &format!("Bearer {token}"))
            .await;
        response.assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn non_admin_token_is_forbidden_on_admin_route() -> anyhow::Result<()> {
        let config = ServiceConfig::default();
        let state = create_test_state(&config)?;
        let server = create_gated_server(state)?;

        let header = bearer_for(&config.token_keys(), &test_customer(false))?;
        let response = server
            .get("/admin-ping")
            .add_header("Authorization", &header)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        Ok(())
    }

    #[tokio::test]
    async fn admin_token_passes_the_admin_gate() -> anyhow::Result<()> {
        let config = ServiceConfig::default();
        let state = create_test_state(&config)?;
        let server = create_gated_server(state)?;

        let header = bearer_for(&config.token_keys(), &test_customer(true))?;
        let response = server
            .get("/admin-ping")
            .add_header("Authorization", &header)
            .await;
        response.assert_status_ok();

        Ok(())
    }

    #[tokio::test]
    async fn missing_token_beats_admin_check() -> anyhow::Result<()> {
        // An unauthenticated request to the admin route answers 401, not 403.
        let config = ServiceConfig::default();
        let server = create_gated_server(create_test_state(&config)?)?;

        let response = server.get("/admin-ping").await;
        response.assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let config = ServiceConfig::default();
        let state = create_test_state(&config)?;
        let app = super::routes(state.clone()).with_state(state);
        let server = TestServer::new(app)?;

        let response = server.get("/does-not-exist").await;
        response.assert_status_not_found();

        Ok(())
    }
}
