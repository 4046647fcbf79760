//! Class endpoints

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::{
    error::ApiError,
    models::kelas::{CreateKelasRequest, KelasQuery, UpdateKelasRequest},
    models::sesi::AuthPengguna,
    policy::{self, Action, Resource},
    state::AppState,
    validation,
};

/// Get one class by id, or list classes
pub async fn get_kelas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<KelasQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Kelas)?;

    if let Some(raw) = query.id.as_deref() {
        let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;
        let kelas = state
            .kelas_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!("Failed to get kelas: {}", e);
                ApiError::Internal
            })?
            .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Kelas not found"))?;

        return Ok(Json(kelas).into_response());
    }

    let page = validation::page(query.limit.as_deref(), query.offset.as_deref());
    let rows = state
        .kelas_repository
        .list(query.search.as_deref(), query.tahun_ajaran.as_deref(), &page)
        .await
        .map_err(|e| {
            error!("Failed to list kelas: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(rows).into_response())
}

/// Create a new class
pub async fn create_kelas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Json(payload): Json<CreateKelasRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Create, Resource::Kelas)?;

    let new = validation::validate_new_kelas(&payload)?;
    let kelas = state
        .kelas_repository
        .create(&new)
        .await
        .map_err(|e| ApiError::from_db(e, &[]))?;

    Ok((StatusCode::CREATED, Json(kelas)))
}

/// Update a class; an empty patch is rejected with NO_UPDATES
pub async fn update_kelas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<KelasQuery>,
    Json(payload): Json<UpdateKelasRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Update, Resource::Kelas)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let patch = validation::validate_update_kelas(&payload)?;
    let updated = state
        .kelas_repository
        .update(id, &patch)
        .await
        .map_err(|e| ApiError::from_db(e, &[]))?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Kelas not found"))?;

    Ok(Json(updated))
}

/// Delete a class, returning the deleted row
pub async fn delete_kelas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<KelasQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Delete, Resource::Kelas)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let deleted = state
        .kelas_repository
        .delete(id)
        .await
        .map_err(|e| {
            error!("Failed to delete kelas: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Kelas not found"))?;

    Ok(Json(json!({
        "message": "Kelas deleted successfully",
        "deleted": deleted,
    })))
}
