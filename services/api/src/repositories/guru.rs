//! Teacher repository

use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::models::guru::{Guru, NewGuru, UpdateGuru};
use crate::validation::Page;

const COLUMNS: &str = "id, pengguna_id, nip, nama, mata_pelajaran, no_telp, created_at";

/// Teacher repository
#[derive(Clone)]
pub struct GuruRepository {
    pool: SqlitePool,
}

impl GuruRepository {
    /// Create a new teacher repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new teacher
    pub async fn create(&self, new: &NewGuru) -> Result<Guru> {
        info!("Creating guru: {}", new.nip);

        let guru = sqlx::query_as::<_, Guru>(
            "INSERT INTO guru (pengguna_id, nip, nama, mata_pelajaran, no_telp, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id, pengguna_id, nip, nama, mata_pelajaran, no_telp, created_at",
        )
        .bind(new.pengguna_id)
        .bind(&new.nip)
        .bind(&new.nama)
        .bind(&new.mata_pelajaran)
        .bind(&new.no_telp)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(guru)
    }

    /// Find a teacher by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Guru>> {
        let guru = sqlx::query_as::<_, Guru>(&format!(
            "SELECT {COLUMNS} FROM guru WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guru)
    }

    /// Find the teacher row linked to a user account
    pub async fn find_by_pengguna_id(&self, pengguna_id: i64) -> Result<Option<Guru>> {
        let guru = sqlx::query_as::<_, Guru>(&format!(
            "SELECT {COLUMNS} FROM guru WHERE pengguna_id = ?"
        ))
        .bind(pengguna_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guru)
    }

    /// List teachers, newest first, with optional search across name, NIP
    /// and subject
    pub async fn list(&self, search: Option<&str>, page: &Page) -> Result<Vec<Guru>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {COLUMNS} FROM guru WHERE 1=1"
        ));

        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (nama LIKE ")
                .push_bind(pattern.clone())
                .push(" OR nip LIKE ")
                .push_bind(pattern.clone())
                .push(" OR mata_pelajaran LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = qb.build_query_as::<Guru>().fetch_all(&self.pool).await?;

        Ok(rows)
    }

    /// Apply a teacher patch, returning the updated row
    pub async fn update(&self, id: i64, patch: &UpdateGuru) -> Result<Option<Guru>> {
        let existing = self.find_by_id(id).await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        if patch.pengguna_id.is_none()
            && patch.nip.is_none()
            && patch.nama.is_none()
            && patch.mata_pelajaran.is_none()
            && patch.no_telp.is_none()
        {
            return Ok(Some(existing));
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE guru SET ");
        let mut set = qb.separated(", ");

        if let Some(pengguna_id) = &patch.pengguna_id {
            set.push("pengguna_id = ").push_bind_unseparated(*pengguna_id);
        }
        if let Some(nip) = &patch.nip {
            set.push("nip = ").push_bind_unseparated(nip);
        }
        if let Some(nama) = &patch.nama {
            set.push("nama = ").push_bind_unseparated(nama);
        }
        if let Some(mata_pelajaran) = &patch.mata_pelajaran {
            set.push("mata_pelajaran = ")
                .push_bind_unseparated(mata_pelajaran);
        }
        if let Some(no_telp) = &patch.no_telp {
            set.push("no_telp = ").push_bind_unseparated(no_telp.clone());
        }

        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(&format!(" RETURNING {COLUMNS}"));

        let updated = qb.build_query_as::<Guru>().fetch_one(&self.pool).await?;

        Ok(Some(updated))
    }

    /// Delete a teacher, returning the deleted row
    pub async fn delete(&self, id: i64) -> Result<Option<Guru>> {
        let deleted = sqlx::query_as::<_, Guru>(&format!(
            "DELETE FROM guru WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(guru) = &deleted {
            info!("Deleted guru: {}", guru.nip);
        }

        Ok(deleted)
    }
}
