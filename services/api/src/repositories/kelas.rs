//! Class repository

use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::models::kelas::{Kelas, NewKelas, UpdateKelas};
use crate::validation::Page;

const COLUMNS: &str = "id, nama_kelas, tahun_ajaran, wali_kelas_id, jumlah_siswa, created_at";

/// Class repository
#[derive(Clone)]
pub struct KelasRepository {
    pool: SqlitePool,
}

impl KelasRepository {
    /// Create a new class repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new class
    pub async fn create(&self, new: &NewKelas) -> Result<Kelas> {
        info!("Creating kelas: {} {}", new.nama_kelas, new.tahun_ajaran);

        let kelas = sqlx::query_as::<_, Kelas>(
            "INSERT INTO kelas (nama_kelas, tahun_ajaran, wali_kelas_id, jumlah_siswa, created_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, nama_kelas, tahun_ajaran, wali_kelas_id, jumlah_siswa, created_at",
        )
        .bind(&new.nama_kelas)
        .bind(&new.tahun_ajaran)
        .bind(new.wali_kelas_id)
        .bind(new.jumlah_siswa)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(kelas)
    }

    /// Find a class by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Kelas>> {
        let kelas = sqlx::query_as::<_, Kelas>(&format!(
            "SELECT {COLUMNS} FROM kelas WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(kelas)
    }

    /// List classes, newest first, with optional search across name and
    /// academic year plus an exact academic-year filter
    pub async fn list(
        &self,
        search: Option<&str>,
        tahun_ajaran: Option<&str>,
        page: &Page,
    ) -> Result<Vec<Kelas>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {COLUMNS} FROM kelas WHERE 1=1"
        ));

        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (nama_kelas LIKE ")
                .push_bind(pattern.clone())
                .push(" OR tahun_ajaran LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(tahun_ajaran) = tahun_ajaran {
            qb.push(" AND tahun_ajaran = ").push_bind(tahun_ajaran);
        }

        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = qb.build_query_as::<Kelas>().fetch_all(&self.pool).await?;

        Ok(rows)
    }

    /// Apply a class patch, returning the updated row
    ///
    /// An empty patch is rejected upstream with NO_UPDATES, so at least
    /// one field is always present here.
    pub async fn update(&self, id: i64, patch: &UpdateKelas) -> Result<Option<Kelas>> {
        let existing = self.find_by_id(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE kelas SET ");
        let mut set = qb.separated(", ");

        if let Some(nama_kelas) = &patch.nama_kelas {
            set.push("nama_kelas = ").push_bind_unseparated(nama_kelas);
        }
        if let Some(tahun_ajaran) = &patch.tahun_ajaran {
            set.push("tahun_ajaran = ")
                .push_bind_unseparated(tahun_ajaran);
        }
        if let Some(wali_kelas_id) = &patch.wali_kelas_id {
            set.push("wali_kelas_id = ")
                .push_bind_unseparated(*wali_kelas_id);
        }
        if let Some(jumlah_siswa) = patch.jumlah_siswa {
            set.push("jumlah_siswa = ").push_bind_unseparated(jumlah_siswa);
        }

        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(&format!(" RETURNING {COLUMNS}"));

        let updated = qb.build_query_as::<Kelas>().fetch_one(&self.pool).await?;

        Ok(Some(updated))
    }

    /// Delete a class, returning the deleted row
    pub async fn delete(&self, id: i64) -> Result<Option<Kelas>> {
        let deleted = sqlx::query_as::<_, Kelas>(&format!(
            "DELETE FROM kelas WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(kelas) = &deleted {
            info!("Deleted kelas: {}", kelas.nama_kelas);
        }

        Ok(deleted)
    }
}
