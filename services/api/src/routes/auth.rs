//! Authentication endpoints

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::ApiError,
    models::sesi::{AuthPengguna, LoginRequest, LoginResponse},
    password,
    state::AppState,
};

/// User login endpoint
///
/// Verifies the credentials and opens a server-side session. The response
/// never says whether the username or the password was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let password_plain = payload.password.as_deref().filter(|s| !s.is_empty());

    let (Some(username), Some(password_plain)) = (username, password_plain) else {
        return Err(ApiError::validation(
            "MISSING_REQUIRED_FIELDS",
            "Username dan password diperlukan",
        ));
    };

    info!("Login attempt for user: {}", username);

    let pengguna = state
        .pengguna_repository
        .find_by_username(username)
        .await
        .map_err(|e| {
            error!("Failed to look up pengguna: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::InvalidCredentials)?;

    let verified = password::verify_password(password_plain, &pengguna.password).map_err(|e| {
        error!("Failed to verify password: {}", e);
        ApiError::Internal
    })?;

    if !verified {
        return Err(ApiError::InvalidCredentials);
    }

    let sesi = state
        .sesi_repository
        .create(pengguna.id, state.session_ttl_secs)
        .await
        .map_err(|e| {
            error!("Failed to create session: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(LoginResponse {
        token: sesi.token,
        pengguna,
    }))
}

/// Logout endpoint; closes every session of the calling user
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .sesi_repository
        .delete_for_pengguna(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to delete sessions: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(json!({"message": "Logged out successfully"})))
}
