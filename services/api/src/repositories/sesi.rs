//! Session repository
//!
//! Sessions are opaque tokens stored server-side; the middleware validates
//! them against this table on every request.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::models::sesi::{AuthPengguna, Sesi};

/// Session repository
#[derive(Clone)]
pub struct SesiRepository {
    pool: SqlitePool,
}

impl SesiRepository {
    /// Create a new session repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a session for a user with the given lifetime
    pub async fn create(&self, pengguna_id: i64, ttl_secs: i64) -> Result<Sesi> {
        info!("Creating session for pengguna: {}", pengguna_id);

        let now = Utc::now();
        let expires_at = now + Duration::seconds(ttl_secs);
        let token = Uuid::new_v4().to_string();

        let sesi = sqlx::query_as::<_, Sesi>(
            "INSERT INTO sesi (token, pengguna_id, expires_at, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, token, pengguna_id, expires_at, created_at",
        )
        .bind(&token)
        .bind(pengguna_id)
        .bind(expires_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(sesi)
    }

    /// Resolve a token into its authenticated principal.
    ///
    /// Returns None for unknown or expired tokens.
    pub async fn find_principal(&self, token: &str) -> Result<Option<AuthPengguna>> {
        let row = sqlx::query(
            "SELECT s.expires_at, p.id, p.role, p.nama \
             FROM sesi s \
             JOIN pengguna p ON p.id = s.pengguna_id \
             WHERE s.token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expires_at: DateTime<Utc> = row.get("expires_at");
        if expires_at <= Utc::now() {
            return Ok(None);
        }

        Ok(Some(AuthPengguna {
            id: row.get("id"),
            role: row.get("role"),
            nama: row.get("nama"),
        }))
    }

    /// Delete every session belonging to a user (logout from all devices)
    pub async fn delete_for_pengguna(&self, pengguna_id: i64) -> Result<u64> {
        info!("Deleting sessions for pengguna: {}", pengguna_id);

        let result = sqlx::query("DELETE FROM sesi WHERE pengguna_id = ?")
            .bind(pengguna_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
