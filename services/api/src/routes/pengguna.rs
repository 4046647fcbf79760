//! User account endpoints

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::{
    error::{ApiError, DuplicateRule},
    models::pengguna::{
        ChangePasswordRequest, CreatePenggunaRequest, PenggunaQuery, Role, UpdatePenggunaRequest,
    },
    models::sesi::AuthPengguna,
    password,
    policy::{self, Action, Resource},
    state::AppState,
    validation,
};

pub const PENGGUNA_DUPLICATES: &[DuplicateRule] = &[DuplicateRule {
    fragment: "pengguna.username",
    code: "DUPLICATE_USERNAME",
    message: "Username already exists",
}];

/// Get one account by id or username, or list accounts
pub async fn get_pengguna(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<PenggunaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Pengguna)?;

    if let Some(raw) = query.id.as_deref() {
        let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;
        let pengguna = state
            .pengguna_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!("Failed to get pengguna: {}", e);
                ApiError::Internal
            })?
            .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", "User not found"))?;

        return Ok(Json(pengguna).into_response());
    }

    if let Some(username) = query.username.as_deref() {
        let pengguna = state
            .pengguna_repository
            .find_by_username(username)
            .await
            .map_err(|e| {
                error!("Failed to get pengguna: {}", e);
                ApiError::Internal
            })?
            .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", "User not found"))?;

        return Ok(Json(pengguna).into_response());
    }

    let page = validation::page(query.limit.as_deref(), query.offset.as_deref());
    let rows = state
        .pengguna_repository
        .list(query.search.as_deref(), &page)
        .await
        .map_err(|e| {
            error!("Failed to list pengguna: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(rows).into_response())
}

/// Create a new account; guru/murid accounts get their linked profile row
/// provisioned in the same transaction
pub async fn create_pengguna(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Json(payload): Json<CreatePenggunaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Create, Resource::Pengguna)?;

    let new = validation::validate_new_pengguna(&payload)?;
    let pengguna = state
        .pengguna_repository
        .create(&new)
        .await
        .map_err(|e| ApiError::from_db(e, PENGGUNA_DUPLICATES))?;

    Ok((StatusCode::CREATED, Json(pengguna)))
}

/// Update an account's profile fields
pub async fn update_pengguna(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<PenggunaQuery>,
    Json(payload): Json<UpdatePenggunaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Update, Resource::Pengguna)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let patch = validation::validate_update_pengguna(&payload)?;
    let updated = state
        .pengguna_repository
        .update(id, &patch)
        .await
        .map_err(|e| ApiError::from_db(e, PENGGUNA_DUPLICATES))?
        .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", "User not found"))?;

    Ok(Json(updated))
}

/// Delete an account, returning the deleted row
pub async fn delete_pengguna(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<PenggunaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Delete, Resource::Pengguna)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let deleted = state
        .pengguna_repository
        .delete(id)
        .await
        .map_err(|e| {
            error!("Failed to delete pengguna: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", "User not found"))?;

    Ok(Json(json!({
        "message": "Pengguna deleted successfully",
        "deleted": deleted,
    })))
}

/// Change an account's password after verifying the current one.
///
/// Only the account owner or an admin may do this.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(id), Some(current_password), Some(new_password)) = (
        payload.id,
        payload.current_password.as_deref(),
        payload.new_password.as_deref(),
    ) else {
        return Err(ApiError::validation(
            "MISSING_REQUIRED_FIELDS",
            "Missing required fields",
        ));
    };

    if auth.id != id && auth.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }

    let pengguna = state
        .pengguna_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get pengguna: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", "User not found"))?;

    let verified = password::verify_password(current_password, &pengguna.password).map_err(|e| {
        error!("Failed to verify password: {}", e);
        ApiError::Internal
    })?;

    if !verified {
        return Err(ApiError::validation(
            "INVALID_CURRENT_PASSWORD",
            "Password saat ini salah",
        ));
    }

    validation::validate_password(new_password)?;

    state
        .pengguna_repository
        .update_password(id, new_password)
        .await
        .map_err(|e| {
            error!("Failed to update password: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(json!({"message": "Password updated successfully"})))
}
