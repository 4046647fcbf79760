//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
///
/// Every variant renders as `{"error": <message>, "code": <stable code>}`
/// so clients can branch on `code` without parsing human text.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed input, with a field-specific code
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
    },

    /// Requested record does not exist
    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
    },

    /// Write rejected because it collides with existing data
    #[error("{message}")]
    Conflict {
        code: &'static str,
        message: String,
    },

    /// Login rejected; the body never says which half was wrong
    #[error("Username atau password salah")]
    InvalidCredentials,

    /// Missing or expired session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed by the policy
    #[error("Forbidden")]
    Forbidden,

    /// Internal server error
    #[error("Internal server error")]
    Internal,

    /// Database infrastructure error
    #[error(transparent)]
    Database(#[from] common::error::DatabaseError),
}

/// Maps a violated unique constraint to an entity-specific conflict code.
///
/// `fragment` is matched against the database error message, which names
/// the offending column (e.g. "UNIQUE constraint failed: murid.nisn").
pub struct DuplicateRule {
    pub fragment: &'static str,
    pub code: &'static str,
    pub message: &'static str,
}

impl ApiError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Translate a repository error into an API error.
    ///
    /// Unique violations become entity-specific conflicts, foreign key
    /// violations become 404s (the referenced record does not exist), and
    /// everything else is logged and collapsed to a generic 500.
    pub fn from_db(err: anyhow::Error, duplicates: &[DuplicateRule]) -> Self {
        if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
            if db_err.is_unique_violation() {
                let message = db_err.message();
                for rule in duplicates {
                    if message.contains(rule.fragment) {
                        return ApiError::conflict(rule.code, rule.message);
                    }
                }
            }

            if db_err.is_foreign_key_violation() {
                return ApiError::not_found("NOT_FOUND", "Referenced record does not exist");
            }
        }

        tracing::error!("Unhandled database error: {:#}", err);
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation { code, .. } => (StatusCode::BAD_REQUEST, *code),
            ApiError::NotFound { code, .. } => (StatusCode::NOT_FOUND, *code),
            ApiError::Conflict { code, .. } => (StatusCode::BAD_REQUEST, *code),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Database(e) => {
                // The body stays generic; details only go to the log.
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            ApiError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
