//! Session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::pengguna::{Pengguna, Role};

/// Server-side session entity; the opaque token is what clients present
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sesi {
    pub id: i64,
    pub token: String,
    pub pengguna_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Authenticated principal attached to every request behind the session
/// layer
#[derive(Debug, Clone)]
pub struct AuthPengguna {
    pub id: i64,
    pub role: Role,
    pub nama: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response for user login: the session token plus the account record
/// (the password hash never serializes)
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub pengguna: Pengguna,
}
