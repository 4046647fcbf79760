//! HTTP routes for the SIAKAD API

use axum::{
    Json, Router,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod guru;
pub mod kelas;
pub mod murid;
pub mod nilai;
pub mod pengguna;
pub mod permintaan;
pub mod stats;

/// Create the router for the API service
///
/// Everything except the health check and login sits behind the session
/// middleware.
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/pengguna",
            get(pengguna::get_pengguna)
                .post(pengguna::create_pengguna)
                .put(pengguna::update_pengguna)
                .patch(pengguna::update_pengguna)
                .delete(pengguna::delete_pengguna),
        )
        .route("/pengguna/password", patch(pengguna::change_password))
        .route(
            "/guru",
            get(guru::get_guru)
                .post(guru::create_guru)
                .put(guru::update_guru)
                .patch(guru::update_guru)
                .delete(guru::delete_guru),
        )
        .route("/guru/me", get(guru::get_guru_me))
        .route(
            "/kelas",
            get(kelas::get_kelas)
                .post(kelas::create_kelas)
                .put(kelas::update_kelas)
                .patch(kelas::update_kelas)
                .delete(kelas::delete_kelas),
        )
        .route(
            "/murid",
            get(murid::get_murid)
                .post(murid::create_murid)
                .put(murid::update_murid)
                .patch(murid::update_murid)
                .delete(murid::delete_murid),
        )
        .route("/murid/me", get(murid::get_murid_me))
        .route(
            "/permintaan-kelas",
            get(permintaan::get_permintaan)
                .post(permintaan::submit_permintaan)
                .put(permintaan::resolve_permintaan),
        )
        .route("/nilai", get(nilai::get_nilai))
        .route("/nilai/rekap", get(nilai::get_rekap))
        .route("/stats", get(stats::get_stats))
        .route("/auth/logout", post(auth::logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(auth::login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "siakad-api"
    }))
}
