//! Teacher endpoints

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
    models::guru::{CreateGuruRequest, GuruQuery, MeQuery, UpdateGuruRequest},
    models::sesi::AuthPengguna,
    policy::{self, Action, Resource},
    state::AppState,
    validation,
};

pub const GURU_DUPLICATES: &[DuplicateRule] = &[
    DuplicateRule {
        fragment: "guru.nip",
        code: "DUPLICATE_NIP",
        message: "NIP already exists",
    },
    DuplicateRule {
        fragment: "guru.pengguna_id",
        code: "DUPLICATE_PENGGUNA_ID",
        message: "Pengguna ID already assigned to another guru",
    },
];

/// Get one teacher by id, or list teachers
pub async fn get_guru(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<GuruQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Guru)?;

    if let Some(raw) = query.id.as_deref() {
        let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;
        let guru = state
            .guru_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!("Failed to get guru: {}", e);
                ApiError::Internal
            })?
            .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Guru not found"))?;

        return Ok(Json(guru).into_response());
    }

    let page = validation::page(query.limit.as_deref(), query.offset.as_deref());
    let rows = state
        .guru_repository
        .list(query.search.as_deref(), &page)
        .await
        .map_err(|e| {
            error!("Failed to list guru: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(rows).into_response())
}

/// Get the teacher row linked to a user account
pub async fn get_guru_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<MeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Guru)?;

    let raw = query
        .pengguna_id
        .as_deref()
        .ok_or_else(|| ApiError::validation("MISSING_PENGGUNA_ID", "Pengguna ID is required"))?;
    let pengguna_id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let guru = state
        .guru_repository
        .find_by_pengguna_id(pengguna_id)
        .await
        .map_err(|e| {
            error!("Failed to get guru: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Guru not found"))?;

    Ok(Json(guru))
}

/// Create a new teacher
pub async fn create_guru(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Json(payload): Json<CreateGuruRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Create, Resource::Guru)?;

    let new = validation::validate_new_guru(&payload)?;
    let guru = state
        .guru_repository
        .create(&new)
        .await
        .map_err(|e| ApiError::from_db(e, GURU_DUPLICATES))?;

    Ok((StatusCode::CREATED, Json(guru)))
}

/// Update a teacher
pub async fn update_guru(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<GuruQuery>,
    Json(payload): Json<UpdateGuruRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Update, Resource::Guru)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let patch = validation::validate_update_guru(&payload)?;
    let updated = state
        .guru_repository
        .update(id, &patch)
        .await
        .map_err(|e| ApiError::from_db(e, GURU_DUPLICATES))?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Guru not found"))?;

    Ok(Json(updated))
}

/// Delete a teacher, returning the deleted row
pub async fn delete_guru(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<GuruQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Delete, Resource::Guru)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let deleted = state
        .guru_repository
        .delete(id)
        .await
        .map_err(|e| {
            error!("Failed to delete guru: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Guru not found"))?;

    Ok(Json(json!({
        "message": "Guru deleted successfully",
        "deleted": deleted,
    })))
}
