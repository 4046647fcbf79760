//! Grade endpoints; read-only

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::error;

use crate::{
    error::ApiError,
    models::nilai::NilaiQuery,
    models::sesi::AuthPengguna,
    policy::{self, Action, Resource},
    state::AppState,
    validation,
};

/// List a student's grades
pub async fn get_nilai(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<NilaiQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Nilai)?;

    let raw = query
        .murid_id
        .as_deref()
        .ok_or_else(|| ApiError::validation("MISSING_MURID_ID", "Murid ID is required"))?;
    let murid_id = validation::parse_id(raw, "INVALID_ID", "Valid muridId is required")?;

    let page = validation::page(query.limit.as_deref(), query.offset.as_deref());
    let rows = state
        .nilai_repository
        .list_by_murid(murid_id, &page)
        .await
        .map_err(|e| {
            error!("Failed to list nilai: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(rows))
}

/// Per-subject grade summary for a student
pub async fn get_rekap(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<NilaiQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Nilai)?;

    let raw = query
        .murid_id
        .as_deref()
        .ok_or_else(|| ApiError::validation("MISSING_MURID_ID", "Murid ID is required"))?;
    let murid_id = validation::parse_id(raw, "INVALID_ID", "Valid muridId is required")?;

    let rows = state
        .nilai_repository
        .rekap_by_murid(murid_id)
        .await
        .map_err(|e| {
            error!("Failed to build nilai summary: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(rows))
}
