//! Student model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student gender, stored as 'L' (male) or 'P' (female)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum JenisKelamin {
    L,
    P,
}

/// Student entity, optionally linked 1:1 to a user account
///
/// `kelas_id` is the authoritative class membership.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Murid {
    pub id: i64,
    pub pengguna_id: Option<i64>,
    pub nisn: String,
    pub nama: String,
    pub jenis_kelamin: JenisKelamin,
    pub tanggal_lahir: Option<String>,
    pub alamat: Option<String>,
    pub kelas_id: Option<i64>,
    pub nama_orang_tua: Option<String>,
    pub no_telp_orang_tua: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wire payload for student creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMuridRequest {
    pub pengguna_id: Option<i64>,
    pub nisn: Option<String>,
    pub nama: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub tanggal_lahir: Option<String>,
    pub alamat: Option<String>,
    pub kelas_id: Option<i64>,
    pub nama_orang_tua: Option<String>,
    pub no_telp_orang_tua: Option<String>,
}

/// Validated student creation payload
#[derive(Debug, Clone)]
pub struct NewMurid {
    pub pengguna_id: Option<i64>,
    pub nisn: String,
    pub nama: String,
    pub jenis_kelamin: JenisKelamin,
    pub tanggal_lahir: Option<String>,
    pub alamat: Option<String>,
    pub kelas_id: Option<i64>,
    pub nama_orang_tua: Option<String>,
    pub no_telp_orang_tua: Option<String>,
}

/// Wire payload for student updates
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMuridRequest {
    pub nisn: Option<String>,
    pub nama: Option<String>,
    pub jenis_kelamin: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub tanggal_lahir: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub alamat: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub kelas_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub nama_orang_tua: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub no_telp_orang_tua: Option<Option<String>>,
}

/// Validated student patch
#[derive(Debug, Clone, Default)]
pub struct UpdateMurid {
    pub nisn: Option<String>,
    pub nama: Option<String>,
    pub jenis_kelamin: Option<JenisKelamin>,
    pub tanggal_lahir: Option<Option<String>>,
    pub alamat: Option<Option<String>>,
    pub kelas_id: Option<Option<i64>>,
    pub nama_orang_tua: Option<Option<String>>,
    pub no_telp_orang_tua: Option<Option<String>>,
}

/// Equality filters and search for student listing
#[derive(Debug, Clone, Default)]
pub struct MuridListFilter {
    pub kelas_id: Option<i64>,
    pub jenis_kelamin: Option<JenisKelamin>,
    pub search: Option<String>,
}

/// Query parameters for student lookup and listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuridQuery {
    pub id: Option<String>,
    pub nisn: Option<String>,
    pub kelas_id: Option<String>,
    pub jenis_kelamin: Option<String>,
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

/// Own-profile view: the student row enriched with class and homeroom
/// teacher details, all nullable because membership is optional.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MuridMe {
    pub id: i64,
    pub nama: String,
    pub nisn: String,
    pub kelas_id: Option<i64>,
    pub nama_kelas: Option<String>,
    pub wali_kelas: Option<String>,
    pub wali_kelas_foto: Option<String>,
}
