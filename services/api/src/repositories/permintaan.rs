//! Class-enrollment request repository
//!
//! Submission relies on a partial unique index so two concurrent requests
//! for the same (murid, kelas) pair cannot both land as pending, and
//! resolution runs as a single transaction so the student's membership,
//! the class counter and the request status move together.

use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::models::permintaan::{
    PendingScope, PermintaanKelas, PermintaanPending, ResolveOutcome, StatusPermintaan,
};

const COLUMNS: &str = "id, murid_id, kelas_id, status, created_at";

/// Enrollment request repository
#[derive(Clone)]
pub struct PermintaanRepository {
    pool: SqlitePool,
}

impl PermintaanRepository {
    /// Create a new enrollment request repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Submit a new request for a (murid, kelas) pair.
    ///
    /// A second pending request for the same pair violates the partial
    /// unique index and surfaces as a unique-constraint error; resolved
    /// requests do not block a fresh submission.
    pub async fn submit(&self, murid_id: i64, kelas_id: i64) -> Result<PermintaanKelas> {
        info!(
            "Submitting enrollment request: murid {} -> kelas {}",
            murid_id, kelas_id
        );

        let permintaan = sqlx::query_as::<_, PermintaanKelas>(&format!(
            "INSERT INTO permintaan_kelas (murid_id, kelas_id, status, created_at) \
             VALUES (?, ?, 'pending', ?) \
             RETURNING {COLUMNS}"
        ))
        .bind(murid_id)
        .bind(kelas_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(permintaan)
    }

    /// List pending requests enriched with student and class details.
    ///
    /// The admin scope sees every pending request; the teacher scope only
    /// sees requests for classes the teacher owns as wali kelas.
    pub async fn list_pending(&self, scope: PendingScope) -> Result<Vec<PermintaanPending>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT p.id, p.status, p.murid_id, m.nama AS nama_murid, m.nisn, \
             p.kelas_id, k.nama_kelas, p.created_at \
             FROM permintaan_kelas p \
             JOIN murid m ON m.id = p.murid_id \
             JOIN kelas k ON k.id = p.kelas_id \
             WHERE p.status = 'pending'",
        );

        if let PendingScope::Guru(guru_id) = scope {
            qb.push(" AND k.wali_kelas_id = ").push_bind(guru_id);
        }

        qb.push(" ORDER BY p.created_at DESC, p.id DESC");

        let rows = qb
            .build_query_as::<PermintaanPending>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Resolve a pending request.
    ///
    /// Approval assigns the student to the class, increments the class
    /// occupancy counter in SQL, and marks the request, all in one
    /// transaction; rejection only flips the status. Requests already in a
    /// terminal state are reported as such and left untouched.
    pub async fn resolve(&self, id: i64, decision: StatusPermintaan) -> Result<ResolveOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, PermintaanKelas>(&format!(
            "SELECT {COLUMNS} FROM permintaan_kelas WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(ResolveOutcome::NotFound);
        };

        if existing.status != StatusPermintaan::Pending {
            return Ok(ResolveOutcome::AlreadyResolved(existing.status));
        }

        if decision == StatusPermintaan::Disetujui {
            sqlx::query("UPDATE murid SET kelas_id = ? WHERE id = ?")
                .bind(existing.kelas_id)
                .bind(existing.murid_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query("UPDATE kelas SET jumlah_siswa = jumlah_siswa + 1 WHERE id = ?")
                .bind(existing.kelas_id)
                .execute(&mut *tx)
                .await?;
        }

        let updated = sqlx::query_as::<_, PermintaanKelas>(&format!(
            "UPDATE permintaan_kelas SET status = ? WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(decision)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Enrollment request {} resolved as {:?}", id, updated.status);

        Ok(ResolveOutcome::Resolved(updated))
    }
}
