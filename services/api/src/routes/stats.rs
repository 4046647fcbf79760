//! Dashboard statistics endpoint

use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::error;

use crate::{
    error::ApiError,
    models::sesi::AuthPengguna,
    policy::{self, Action, Resource},
    state::AppState,
};

/// Aggregate counts plus the recent-activity feed
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPengguna>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(&auth, Action::Read, Resource::Stats)?;

    let overview = state.stats_repository.overview().await.map_err(|e| {
        error!("Failed to compute stats: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(overview))
}
