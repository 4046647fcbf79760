//! User account model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account role, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Guru,
    Murid,
}

/// User account entity
///
/// The password hash never serializes into a response.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pengguna {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub nama: String,
    pub foto: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wire payload for account creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePenggunaRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub nama: Option<String>,
    pub foto: Option<String>,
}

/// Validated account creation payload; `password` is still plaintext and
/// is hashed by the repository.
#[derive(Debug, Clone)]
pub struct NewPengguna {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub nama: String,
    pub foto: Option<String>,
}

/// Wire payload for profile updates
///
/// Role and password are not updatable here; the password has its own
/// endpoint and the role is fixed at provisioning time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePenggunaRequest {
    pub username: Option<String>,
    pub nama: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub foto: Option<Option<String>>,
}

/// Validated profile patch
#[derive(Debug, Clone, Default)]
pub struct UpdatePengguna {
    pub username: Option<String>,
    pub nama: Option<String>,
    pub foto: Option<Option<String>>,
}

/// Query parameters for account lookup and listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenggunaQuery {
    pub id: Option<String>,
    pub username: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Request for password change
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub id: Option<i64>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}
