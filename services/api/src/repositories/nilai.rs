//! Grade repository; read-only in this service

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::nilai::{Nilai, RekapNilai};
use crate::validation::Page;

/// Grade repository
#[derive(Clone)]
pub struct NilaiRepository {
    pool: SqlitePool,
}

impl NilaiRepository {
    /// Create a new grade repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a student's grades, newest first
    pub async fn list_by_murid(&self, murid_id: i64, page: &Page) -> Result<Vec<Nilai>> {
        let rows = sqlx::query_as::<_, Nilai>(
            "SELECT id, murid_id, mata_pelajaran, skor, tipe, tanggal, created_at \
             FROM nilai \
             WHERE murid_id = ? \
             ORDER BY tanggal DESC, id DESC \
             LIMIT ? OFFSET ?",
        )
        .bind(murid_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Per-subject aggregation of a student's grades: count and average
    /// score, recomputed from the rows on every call
    pub async fn rekap_by_murid(&self, murid_id: i64) -> Result<Vec<RekapNilai>> {
        let rows = sqlx::query_as::<_, RekapNilai>(
            "SELECT mata_pelajaran, COUNT(*) AS jumlah, AVG(skor) AS rata_rata \
             FROM nilai \
             WHERE murid_id = ? \
             GROUP BY mata_pelajaran \
             ORDER BY mata_pelajaran",
        )
        .bind(murid_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
