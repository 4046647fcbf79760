//! Student endpoints

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
    models::murid::{CreateMuridRequest, MeQuery, MuridListFilter, MuridQuery, UpdateMuridRequest},
    models::sesi::AuthPengguna,
    policy::{self, Action, Resource},
    state::AppState,
    validation,
};

pub const MURID_DUPLICATES: &[DuplicateRule] = &[
    DuplicateRule {
        fragment: "murid.nisn",
        code: "NISN_ALREADY_EXISTS",
        message: "NISN already exists",
    },
    DuplicateRule {
        fragment: "murid.pengguna_id",
        code: "DUPLICATE_PENGGUNA_ID",
        message: "Pengguna ID already assigned to another murid",
    },
];

/// Get one student by id or NISN, or list students with filters
pub async fn get_murid(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<MuridQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Murid)?;

    if let Some(raw) = query.id.as_deref() {
        let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;
        let murid = state
            .murid_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!("Failed to get murid: {}", e);
                ApiError::Internal
            })?
            .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Murid not found"))?;

        return Ok(Json(murid).into_response());
    }

    if let Some(nisn) = query.nisn.as_deref() {
        let murid = state
            .murid_repository
            .find_by_nisn(nisn)
            .await
            .map_err(|e| {
                error!("Failed to get murid: {}", e);
                ApiError::Internal
            })?
            .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Murid not found"))?;

        return Ok(Json(murid).into_response());
    }

    let kelas_id = query
        .kelas_id
        .as_deref()
        .map(|raw| validation::parse_id(raw, "INVALID_KELAS_ID", "Valid kelasId is required"))
        .transpose()?;
    let jenis_kelamin = query
        .jenis_kelamin
        .as_deref()
        .map(validation::parse_jenis_kelamin)
        .transpose()?;

    let filter = MuridListFilter {
        kelas_id,
        jenis_kelamin,
        search: query.search.clone(),
    };
    let page = validation::page(query.limit.as_deref(), query.offset.as_deref());

    let rows = state
        .murid_repository
        .list(&filter, &page)
        .await
        .map_err(|e| {
            error!("Failed to list murid: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(rows).into_response())
}

/// Get the student profile linked to a user account, enriched with class
/// and homeroom teacher details
pub async fn get_murid_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<MeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Murid)?;

    let raw = query
        .pengguna_id
        .as_deref()
        .ok_or_else(|| ApiError::validation("MISSING_PENGGUNA_ID", "Pengguna ID is required"))?;
    let pengguna_id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let me = state
        .murid_repository
        .find_me(pengguna_id)
        .await
        .map_err(|e| {
            error!("Failed to get murid profile: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Murid not found"))?;

    Ok(Json(me))
}

/// Create a new student
pub async fn create_murid(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Json(payload): Json<CreateMuridRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Create, Resource::Murid)?;

    let new = validation::validate_new_murid(&payload)?;
    let murid = state
        .murid_repository
        .create(&new)
        .await
        .map_err(|e| ApiError::from_db(e, MURID_DUPLICATES))?;

    Ok((StatusCode::CREATED, Json(murid)))
}

/// Update a student
pub async fn update_murid(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<MuridQuery>,
    Json(payload): Json<UpdateMuridRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Update, Resource::Murid)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let patch = validation::validate_update_murid(&payload)?;
    let updated = state
        .murid_repository
        .update(id, &patch)
        .await
        .map_err(|e| ApiError::from_db(e, MURID_DUPLICATES))?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Murid not found"))?;

    Ok(Json(updated))
}

/// Delete a student, returning the deleted row
pub async fn delete_murid(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<MuridQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Delete, Resource::Murid)?;

    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::validation("INVALID_ID", "Valid ID is required"))?;
    let id = validation::parse_id(raw, "INVALID_ID", "Valid ID is required")?;

    let deleted = state
        .murid_repository
        .delete(id)
        .await
        .map_err(|e| {
            error!("Failed to delete murid: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", "Murid not found"))?;

    Ok(Json(json!({
        "message": "Murid deleted successfully",
        "deleted": deleted,
    })))
}
