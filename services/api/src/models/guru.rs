//! Teacher model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Teacher entity, optionally linked 1:1 to a user account
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Guru {
    pub id: i64,
    pub pengguna_id: Option<i64>,
    pub nip: String,
    pub nama: String,
    pub mata_pelajaran: String,
    pub no_telp: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wire payload for teacher creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuruRequest {
    pub pengguna_id: Option<i64>,
    pub nip: Option<String>,
    pub nama: Option<String>,
    pub mata_pelajaran: Option<String>,
    pub no_telp: Option<String>,
}

/// Validated teacher creation payload
#[derive(Debug, Clone)]
pub struct NewGuru {
    pub pengguna_id: Option<i64>,
    pub nip: String,
    pub nama: String,
    pub mata_pelajaran: String,
    pub no_telp: Option<String>,
}

/// Wire payload for teacher updates
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuruRequest {
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub pengguna_id: Option<Option<i64>>,
    pub nip: Option<String>,
    pub nama: Option<String>,
    pub mata_pelajaran: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub no_telp: Option<Option<String>>,
}

/// Validated teacher patch
#[derive(Debug, Clone, Default)]
pub struct UpdateGuru {
    pub pengguna_id: Option<Option<i64>>,
    pub nip: Option<String>,
    pub nama: Option<String>,
    pub mata_pelajaran: Option<String>,
    pub no_telp: Option<Option<String>>,
}

/// Query parameters for teacher lookup and listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuruQuery {
    pub id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Query parameters for the own-profile endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeQuery {
    pub pengguna_id: Option<String>,
}
