use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::extract::AuthState;
use crate::handler::ErrorKind;

/// Rejects the request unless the verified identity carries the admin
/// claim.
///
/// Answers 403 for authenticated non-admins, distinct from the 401 an
/// unauthenticated request receives. Handlers behind this gate re-check the
/// claim themselves; the gate does not replace that check.
pub async fn require_admin(
    AuthState(auth_claims): AuthState,
    request: Request,
    next: Next,
) -> Response {
    if !auth_claims.is_admin {
        return ErrorKind::Forbidden.into_response();
    }

    next.run(request).await
}
