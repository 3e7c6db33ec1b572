//! Authentication handlers for customer login and registration.
//!
//! Registration and login are the only public account routes. Both mint a
//! bearer token on success; login deliberately answers with a single
//! "invalid email or password" regardless of which check failed.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use patron_postgres::PgClient;
use patron_postgres::model::NewCustomer;
use patron_postgres::query::CustomerRepository;

use crate::extract::{AuthClaims, Json, ValidateJson};
use crate::handler::request::{LoginRequest, RegisterRequest};
use crate::handler::response::{Customer, LoginResponse, RegisterResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{AuthHasher, ServiceState, TokenKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "patron_server::handler::authentication";

/// Creates a new customer account and mints its first token.
#[tracing::instrument(skip_all)]
async fn register(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    State(token_keys): State<TokenKeys>,
    ValidateJson(request): ValidateJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        email = %request.email,
        username = %request.username,
        "registration attempt"
    );

    let mut conn = pg_client.get_connection().await?;
    let normalized_email = request.email.to_lowercase();

    // Single combined existence check for a friendlier error; the unique
    // indexes remain the actual guarantee under concurrent registration.
    if conn
        .identity_exists(&normalized_email, &request.username)
        .await?
    {
        tracing::warn!(
            target: TRACING_TARGET,
            email = %normalized_email,
            username = %request.username,
            "registration failed: email or username already exists"
        );
        return Err(ErrorKind::Conflict
            .with_message("Customer with this email or username already exists")
            .with_resource("customer"));
    }

    let password_hash = auth_hasher.hash_password(&request.password)?;

    let new_customer = NewCustomer {
        username: request.username,
        email_address: normalized_email,
        password_hash,
        ..Default::default()
    };

    let customer = conn.create_customer(new_customer).await?;
    tracing::info!(
        target: TRACING_TARGET,
        customer_id = %customer.id,
        email = %customer.email_address,
        username = %customer.username,
        "customer registered"
    );

    // Registration tokens carry only {customer_id, email} and use the
    // fixed 7-day lifetime rather than the configured default.
    let token = AuthClaims::registration(&customer).into_token(token_keys.encoding_key())?;

    let response = RegisterResponse {
        message: "customer registered".to_owned(),
        token,
        customer: Customer::from_model(customer),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Verifies credentials and mints a full-claims token.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    State(token_keys): State<TokenKeys>,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        email = %request.email,
        "login attempt"
    );

    let mut conn = pg_client.get_connection().await?;
    let normalized_email = request.email.to_lowercase();
    let customer = conn.find_customer_by_email(&normalized_email).await?;

    // Always perform password verification so timing does not reveal
    // whether the email exists.
    let password_valid = match &customer {
        Some(found) => auth_hasher.verify_password(&request.password, &found.password_hash),
        None => auth_hasher.verify_dummy_password(&request.password),
    };

    let Some(customer) = customer.filter(|_| password_valid) else {
        tracing::warn!(
            target: TRACING_TARGET,
            email = %normalized_email,
            "login failed"
        );

        // One message for both failure causes; do not leak which field
        // was wrong.
        return Err(ErrorKind::Unauthorized
            .with_message("invalid email or password")
            .with_resource("authentication"));
    };

    let token = AuthClaims::authenticated(&customer, token_keys.default_ttl())
        .into_token(token_keys.encoding_key())?;

    tracing::info!(
        target: TRACING_TARGET,
        customer_id = %customer.id,
        email = %normalized_email,
        "login successful"
    );

    let response = LoginResponse {
        message: "login successful".to_owned(),
        customer: Customer::from_model(customer),
        token,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
