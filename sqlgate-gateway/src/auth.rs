//! Bearer-token authenticator for the query-bearing routes.
//!
//! One shared secret grants full access. Rejection is a single generic
//! 401 that does not distinguish a missing, malformed, or wrong
//! credential, and no handler runs after a rejection.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::config::SharedSecret;
use crate::error::GatewayError;
use crate::routes::AppState;

/// Middleware guarding every `/query/*` route.
///
/// # Errors
/// Returns [`GatewayError::Unauthorized`] unless the request carries
/// `Authorization: Bearer <secret>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(GatewayError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(GatewayError::Unauthorized)?;

    if !token_matches(token, &state.secret) {
        return Err(GatewayError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Compare the presented token against the configured secret.
///
/// Both sides are hashed first so comparison cost does not depend on
/// where the candidate diverges from the secret.
fn token_matches(token: &str, secret: &SharedSecret) -> bool {
    let presented = Sha256::digest(token.as_bytes());
    let expected = Sha256::digest(secret.as_bytes());
    presented == expected
}
