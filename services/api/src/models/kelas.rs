//! Class model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Class entity
///
/// `jumlah_siswa` is a denormalized occupancy counter; the enrollment
/// approval transaction is its only writer besides direct class edits.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Kelas {
    pub id: i64,
    pub nama_kelas: String,
    pub tahun_ajaran: String,
    pub wali_kelas_id: Option<i64>,
    pub jumlah_siswa: i64,
    pub created_at: DateTime<Utc>,
}

/// Wire payload for class creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKelasRequest {
    pub nama_kelas: Option<String>,
    pub tahun_ajaran: Option<String>,
    pub wali_kelas_id: Option<i64>,
    pub jumlah_siswa: Option<i64>,
}

/// Validated class creation payload
#[derive(Debug, Clone)]
pub struct NewKelas {
    pub nama_kelas: String,
    pub tahun_ajaran: String,
    pub wali_kelas_id: Option<i64>,
    pub jumlah_siswa: i64,
}

/// Wire payload for class updates
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKelasRequest {
    pub nama_kelas: Option<String>,
    pub tahun_ajaran: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub wali_kelas_id: Option<Option<i64>>,
    pub jumlah_siswa: Option<i64>,
}

/// Validated class patch
#[derive(Debug, Clone, Default)]
pub struct UpdateKelas {
    pub nama_kelas: Option<String>,
    pub tahun_ajaran: Option<String>,
    pub wali_kelas_id: Option<Option<i64>>,
    pub jumlah_siswa: Option<i64>,
}

/// Query parameters for class lookup and listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KelasQuery {
    pub id: Option<String>,
    pub search: Option<String>,
    pub tahun_ajaran: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
