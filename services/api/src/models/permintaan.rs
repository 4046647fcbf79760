//! Class-enrollment request model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request status; pending is the only non-terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum StatusPermintaan {
    Pending,
    Disetujui,
    Ditolak,
}

/// Enrollment request entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PermintaanKelas {
    pub id: i64,
    pub murid_id: i64,
    pub kelas_id: i64,
    pub status: StatusPermintaan,
    pub created_at: DateTime<Utc>,
}

/// Pending request enriched with student and class details for review
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PermintaanPending {
    pub id: i64,
    pub status: StatusPermintaan,
    pub murid_id: i64,
    pub nama_murid: String,
    pub nisn: String,
    pub kelas_id: i64,
    pub nama_kelas: String,
    pub created_at: DateTime<Utc>,
}

/// Visibility scope for the pending-request listing
#[derive(Debug, Clone, Copy)]
pub enum PendingScope {
    /// Every pending request (admin view)
    All,
    /// Only requests for classes owned by this teacher
    Guru(i64),
}

/// Outcome of a resolution attempt
#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    NotFound,
    AlreadyResolved(StatusPermintaan),
    Resolved(PermintaanKelas),
}

/// Wire payload for request submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPermintaanRequest {
    pub murid_id: Option<i64>,
    pub kelas_id: Option<i64>,
}

/// Wire payload for request resolution
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePermintaanRequest {
    pub id: Option<i64>,
    pub status: Option<String>,
}

/// Query parameters for the pending-request listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermintaanQuery {
    pub all: Option<String>,
    pub guru_id: Option<String>,
    pub murid_id: Option<String>,
}
