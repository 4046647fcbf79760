//! Class-enrollment request endpoints

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use crate::{
    error::{ApiError, DuplicateRule},
    models::pengguna::Role,
    models::permintaan::{
        PendingScope, PermintaanQuery, ResolveOutcome, ResolvePermintaanRequest,
        SubmitPermintaanRequest,
    },
    models::sesi::AuthPengguna,
    policy::{self, Action, Resource},
    state::AppState,
    validation,
};

pub const PERMINTAAN_DUPLICATES: &[DuplicateRule] = &[DuplicateRule {
    fragment: "permintaan_kelas",
    code: "DUPLICATE_REQUEST",
    message: "Request already exists",
}];

/// List pending requests.
///
/// `?all=true` is the admin view across every class; `?guruId=` restricts
/// the listing to classes owned by that teacher.
pub async fn get_permintaan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Query(query): Query<PermintaanQuery>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::PermintaanKelas)?;

    let scope = if query.all.as_deref() == Some("true") {
        if auth.role != Role::Admin {
            return Err(ApiError::Forbidden);
        }
        PendingScope::All
    } else if let Some(raw) = query.guru_id.as_deref() {
        let guru_id = validation::parse_id(raw, "INVALID_ID", "Valid guruId is required")?;
        PendingScope::Guru(guru_id)
    } else {
        return Err(ApiError::validation(
            "MISSING_SCOPE",
            "Missing muridId or guruId",
        ));
    };

    let rows = state
        .permintaan_repository
        .list_pending(scope)
        .await
        .map_err(|e| {
            error!("Failed to list permintaan: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(rows))
}

/// Submit an enrollment request for a (murid, kelas) pair
pub async fn submit_permintaan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Json(payload): Json<SubmitPermintaanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Submit, Resource::PermintaanKelas)?;

    let (Some(murid_id), Some(kelas_id)) = (payload.murid_id, payload.kelas_id) else {
        return Err(ApiError::validation(
            "MISSING_REQUIRED_FIELDS",
            "Missing muridId or kelasId",
        ));
    };

    let permintaan = state
        .permintaan_repository
        .submit(murid_id, kelas_id)
        .await
        .map_err(|e| ApiError::from_db(e, PERMINTAAN_DUPLICATES))?;

    Ok((StatusCode::CREATED, Json(permintaan)))
}

/// Approve or reject a pending request
pub async fn resolve_permintaan(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
    Json(payload): Json<ResolvePermintaanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Resolve, Resource::PermintaanKelas)?;

    let (Some(id), Some(status_raw)) = (payload.id, payload.status.as_deref()) else {
        return Err(ApiError::validation(
            "MISSING_REQUIRED_FIELDS",
            "Missing id or status",
        ));
    };

    let decision = validation::parse_keputusan(status_raw)?;

    let outcome = state
        .permintaan_repository
        .resolve(id, decision)
        .await
        .map_err(|e| {
            error!("Failed to resolve permintaan: {}", e);
            ApiError::Internal
        })?;

    match outcome {
        ResolveOutcome::NotFound => {
            Err(ApiError::not_found("NOT_FOUND", "Request not found"))
        }
        ResolveOutcome::AlreadyResolved(_) => Err(ApiError::conflict(
            "ALREADY_RESOLVED",
            "Request already resolved",
        )),
        ResolveOutcome::Resolved(permintaan) => Ok(Json(permintaan)),
    }
}
