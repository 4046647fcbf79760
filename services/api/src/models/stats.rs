//! Dashboard statistics views

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A recently created student or class, tagged with its entity type
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub tipe: String,
    pub id: i64,
    pub nama: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counts plus the recent-activity feed
///
/// Recomputed from source rows on every call; never cached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub pengguna_count: i64,
    pub guru_count: i64,
    pub kelas_count: i64,
    pub murid_count: i64,
    pub recent_activity: Vec<RecentActivity>,
}
