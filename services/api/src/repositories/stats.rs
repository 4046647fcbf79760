//! Dashboard statistics repository

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::stats::{RecentActivity, StatsOverview};

/// How many recent creations the activity feed carries
const RECENT_LIMIT: i64 = 5;

/// Dashboard statistics repository
#[derive(Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    /// Create a new statistics repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Live entity counts plus the most recent student and class
    /// creations, merged and truncated
    pub async fn overview(&self) -> Result<StatsOverview> {
        let pengguna_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pengguna")
            .fetch_one(&self.pool)
            .await?;

        let guru_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guru")
            .fetch_one(&self.pool)
            .await?;

        let kelas_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kelas")
            .fetch_one(&self.pool)
            .await?;

        let murid_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM murid")
            .fetch_one(&self.pool)
            .await?;

        let recent_activity = sqlx::query_as::<_, RecentActivity>(
            "SELECT tipe, id, nama, created_at FROM ( \
               SELECT 'murid' AS tipe, id, nama, created_at FROM murid \
               UNION ALL \
               SELECT 'kelas' AS tipe, id, nama_kelas AS nama, created_at FROM kelas \
             ) ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(StatsOverview {
            pengguna_count,
            guru_count,
            kelas_count,
            murid_count,
            recent_activity,
        })
    }
}
