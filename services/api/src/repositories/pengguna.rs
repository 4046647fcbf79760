//! User account repository

use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::models::pengguna::{NewPengguna, Pengguna, Role, UpdatePengguna};
use crate::password;
use crate::validation::Page;

const COLUMNS: &str = "id, username, password, role, nama, foto, created_at";

/// Placeholder natural identifier for provisioned guru/murid rows; the
/// admin replaces it with the real NIP/NISN later.
fn placeholder_identifier() -> String {
    format!("TEMP-{}", Uuid::new_v4())
}

/// User account repository
#[derive(Clone)]
pub struct PenggunaRepository {
    pool: SqlitePool,
}

impl PenggunaRepository {
    /// Create a new user account repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an account; the password is hashed here.
    ///
    /// An account with role guru or murid also gets its linked profile row
    /// provisioned with a placeholder identifier, in the same transaction,
    /// so a later read never has to create it on the fly.
    pub async fn create(&self, new: &NewPengguna) -> Result<Pengguna> {
        info!("Creating pengguna: {}", new.username);

        let password_hash = password::hash_password(&new.password)?;
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let pengguna = sqlx::query_as::<_, Pengguna>(
            "INSERT INTO pengguna (username, password, role, nama, foto, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id, username, password, role, nama, foto, created_at",
        )
        .bind(&new.username)
        .bind(&password_hash)
        .bind(new.role)
        .bind(&new.nama)
        .bind(&new.foto)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        match new.role {
            Role::Guru => {
                sqlx::query(
                    "INSERT INTO guru (pengguna_id, nip, nama, mata_pelajaran, created_at) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(pengguna.id)
                .bind(placeholder_identifier())
                .bind(&pengguna.nama)
                .bind("Umum")
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
            Role::Murid => {
                sqlx::query(
                    "INSERT INTO murid (pengguna_id, nisn, nama, jenis_kelamin, created_at) \
                     VALUES (?, ?, ?, 'L', ?)",
                )
                .bind(pengguna.id)
                .bind(placeholder_identifier())
                .bind(&pengguna.nama)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
            Role::Admin => {}
        }

        tx.commit().await?;

        Ok(pengguna)
    }

    /// Find an account by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Pengguna>> {
        let pengguna = sqlx::query_as::<_, Pengguna>(&format!(
            "SELECT {COLUMNS} FROM pengguna WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pengguna)
    }

    /// Find an account by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Pengguna>> {
        let pengguna = sqlx::query_as::<_, Pengguna>(&format!(
            "SELECT {COLUMNS} FROM pengguna WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pengguna)
    }

    /// List accounts, newest first, with optional search across username
    /// and display name
    pub async fn list(&self, search: Option<&str>, page: &Page) -> Result<Vec<Pengguna>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {COLUMNS} FROM pengguna WHERE 1=1"
        ));

        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (username LIKE ")
                .push_bind(pattern.clone())
                .push(" OR nama LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = qb
            .build_query_as::<Pengguna>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Apply a profile patch.
    ///
    /// A display-name change also rewrites the denormalized name on the
    /// linked guru/murid row; both writes commit or neither does.
    pub async fn update(&self, id: i64, patch: &UpdatePengguna) -> Result<Option<Pengguna>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Pengguna>(&format!(
            "SELECT {COLUMNS} FROM pengguna WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        if patch.username.is_none() && patch.nama.is_none() && patch.foto.is_none() {
            return Ok(Some(existing));
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE pengguna SET ");
        let mut set = qb.separated(", ");

        if let Some(username) = &patch.username {
            set.push("username = ").push_bind_unseparated(username);
        }
        if let Some(nama) = &patch.nama {
            set.push("nama = ").push_bind_unseparated(nama);
        }
        if let Some(foto) = &patch.foto {
            set.push("foto = ").push_bind_unseparated(foto.clone());
        }

        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(&format!(" RETURNING {COLUMNS}"));

        let updated = qb
            .build_query_as::<Pengguna>()
            .fetch_one(&mut *tx)
            .await?;

        if let Some(nama) = &patch.nama {
            sqlx::query("UPDATE guru SET nama = ? WHERE pengguna_id = ?")
                .bind(nama)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE murid SET nama = ? WHERE pengguna_id = ?")
                .bind(nama)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Some(updated))
    }

    /// Replace an account's password hash
    pub async fn update_password(&self, id: i64, new_password: &str) -> Result<bool> {
        info!("Updating password for pengguna: {}", id);

        let password_hash = password::hash_password(new_password)?;
        let result = sqlx::query("UPDATE pengguna SET password = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an account, returning the deleted row
    pub async fn delete(&self, id: i64) -> Result<Option<Pengguna>> {
        let deleted = sqlx::query_as::<_, Pengguna>(&format!(
            "DELETE FROM pengguna WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(pengguna) = &deleted {
            info!("Deleted pengguna: {}", pengguna.username);
        }

        Ok(deleted)
    }
}
