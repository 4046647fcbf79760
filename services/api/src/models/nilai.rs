//! Grade model and report views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Grade entity; read-only in this service
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Nilai {
    pub id: i64,
    pub murid_id: i64,
    pub mata_pelajaran: String,
    pub skor: i64,
    pub tipe: String,
    pub tanggal: String,
    pub created_at: DateTime<Utc>,
}

/// Per-subject aggregation of a student's grades
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RekapNilai {
    pub mata_pelajaran: String,
    pub jumlah: i64,
    pub rata_rata: f64,
}

/// Query parameters for grade listing and reports
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NilaiQuery {
    pub murid_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
