//! Student repository

use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::models::murid::{Murid, MuridListFilter, MuridMe, NewMurid, UpdateMurid};
use crate::validation::Page;

const COLUMNS: &str = "id, pengguna_id, nisn, nama, jenis_kelamin, tanggal_lahir, alamat, \
                       kelas_id, nama_orang_tua, no_telp_orang_tua, created_at";

/// Student repository
#[derive(Clone)]
pub struct MuridRepository {
    pool: SqlitePool,
}

impl MuridRepository {
    /// Create a new student repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new student
    pub async fn create(&self, new: &NewMurid) -> Result<Murid> {
        info!("Creating murid: {}", new.nisn);

        let murid = sqlx::query_as::<_, Murid>(&format!(
            "INSERT INTO murid (pengguna_id, nisn, nama, jenis_kelamin, tanggal_lahir, alamat, \
             kelas_id, nama_orang_tua, no_telp_orang_tua, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        ))
        .bind(new.pengguna_id)
        .bind(&new.nisn)
        .bind(&new.nama)
        .bind(new.jenis_kelamin)
        .bind(&new.tanggal_lahir)
        .bind(&new.alamat)
        .bind(new.kelas_id)
        .bind(&new.nama_orang_tua)
        .bind(&new.no_telp_orang_tua)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(murid)
    }

    /// Find a student by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Murid>> {
        let murid = sqlx::query_as::<_, Murid>(&format!(
            "SELECT {COLUMNS} FROM murid WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(murid)
    }

    /// Find a student by NISN
    pub async fn find_by_nisn(&self, nisn: &str) -> Result<Option<Murid>> {
        let murid = sqlx::query_as::<_, Murid>(&format!(
            "SELECT {COLUMNS} FROM murid WHERE nisn = ?"
        ))
        .bind(nisn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(murid)
    }

    /// Own-profile view: the student row linked to a user account,
    /// enriched with class and homeroom teacher details
    pub async fn find_me(&self, pengguna_id: i64) -> Result<Option<MuridMe>> {
        let me = sqlx::query_as::<_, MuridMe>(
            "SELECT m.id, m.nama, m.nisn, m.kelas_id, k.nama_kelas, \
             g.nama AS wali_kelas, p.foto AS wali_kelas_foto \
             FROM murid m \
             LEFT JOIN kelas k ON k.id = m.kelas_id \
             LEFT JOIN guru g ON g.id = k.wali_kelas_id \
             LEFT JOIN pengguna p ON p.id = g.pengguna_id \
             WHERE m.pengguna_id = ?",
        )
        .bind(pengguna_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(me)
    }

    /// List students, newest first, with equality filters and search
    /// across name, NISN and parent name
    pub async fn list(&self, filter: &MuridListFilter, page: &Page) -> Result<Vec<Murid>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {COLUMNS} FROM murid WHERE 1=1"
        ));

        if let Some(kelas_id) = filter.kelas_id {
            qb.push(" AND kelas_id = ").push_bind(kelas_id);
        }

        if let Some(jenis_kelamin) = filter.jenis_kelamin {
            qb.push(" AND jenis_kelamin = ").push_bind(jenis_kelamin);
        }

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (nama LIKE ")
                .push_bind(pattern.clone())
                .push(" OR nisn LIKE ")
                .push_bind(pattern.clone())
                .push(" OR nama_orang_tua LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = qb.build_query_as::<Murid>().fetch_all(&self.pool).await?;

        Ok(rows)
    }

    /// Apply a student patch, returning the updated row
    pub async fn update(&self, id: i64, patch: &UpdateMurid) -> Result<Option<Murid>> {
        let existing = self.find_by_id(id).await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        if patch.nisn.is_none()
            && patch.nama.is_none()
            && patch.jenis_kelamin.is_none()
            && patch.tanggal_lahir.is_none()
            && patch.alamat.is_none()
            && patch.kelas_id.is_none()
            && patch.nama_orang_tua.is_none()
            && patch.no_telp_orang_tua.is_none()
        {
            return Ok(Some(existing));
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE murid SET ");
        let mut set = qb.separated(", ");

        if let Some(nisn) = &patch.nisn {
            set.push("nisn = ").push_bind_unseparated(nisn);
        }
        if let Some(nama) = &patch.nama {
            set.push("nama = ").push_bind_unseparated(nama);
        }
        if let Some(jenis_kelamin) = patch.jenis_kelamin {
            set.push("jenis_kelamin = ")
                .push_bind_unseparated(jenis_kelamin);
        }
        if let Some(tanggal_lahir) = &patch.tanggal_lahir {
            set.push("tanggal_lahir = ")
                .push_bind_unseparated(tanggal_lahir.clone());
        }
        if let Some(alamat) = &patch.alamat {
            set.push("alamat = ").push_bind_unseparated(alamat.clone());
        }
        if let Some(kelas_id) = &patch.kelas_id {
            set.push("kelas_id = ").push_bind_unseparated(*kelas_id);
        }
        if let Some(nama_orang_tua) = &patch.nama_orang_tua {
            set.push("nama_orang_tua = ")
                .push_bind_unseparated(nama_orang_tua.clone());
        }
        if let Some(no_telp_orang_tua) = &patch.no_telp_orang_tua {
            set.push("no_telp_orang_tua = ")
                .push_bind_unseparated(no_telp_orang_tua.clone());
        }

        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(&format!(" RETURNING {COLUMNS}"));

        let updated = qb.build_query_as::<Murid>().fetch_one(&self.pool).await?;

        Ok(Some(updated))
    }

    /// Delete a student, returning the deleted row
    pub async fn delete(&self, id: i64) -> Result<Option<Murid>> {
        let deleted = sqlx::query_as::<_, Murid>(&format!(
            "DELETE FROM murid WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(murid) = &deleted {
            info!("Deleted murid: {}", murid.nisn);
        }

        Ok(deleted)
    }
}
