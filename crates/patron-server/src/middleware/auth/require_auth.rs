use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthState;

/// Rejects the request with 401 unless it carries a verified bearer token.
///
/// Succeeding extraction leaves the verified claims cached in the request
/// extensions, so the wrapped handler reads the same identity without
/// re-verifying the token.
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
