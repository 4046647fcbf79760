//! Session-token authentication middleware

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::{error::ApiError, state::AppState};

/// Authentication middleware
///
/// Every protected request presents `Authorization: Bearer <token>`; the
/// token is looked up in the session store and checked for expiry on every
/// call. The resolved principal is inserted into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    // Look up the session; an unknown or expired token is a 401
    let principal = state
        .sesi_repository
        .find_principal(token)
        .await
        .map_err(|e| {
            error!("Failed to look up session: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::Unauthorized)?;

    // Insert the principal into the request extensions
    req.extensions_mut().insert(principal);

    // Call the next service
    let response = next.run(req).await;

    Ok(response)
}
