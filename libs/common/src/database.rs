//! Database module for handling SQLite connections and operations
//!
//! This module provides connection pooling, configuration, and health checks
//! for the SQLite database backing the application.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use tracing::info;

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://siakad.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Initialize a SQLite connection pool
///
/// The database file is created if it does not exist, and foreign key
/// enforcement is switched on for every connection.
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database pool initialized: {}", config.database_url);

    Ok(pool)
}

/// Initialize an in-memory SQLite pool
///
/// A single connection is kept alive for the lifetime of the pool; an
/// in-memory database vanishes the moment its last connection closes.
pub async fn init_memory_pool() -> DatabaseResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    Ok(pool)
}

/// Check database connectivity
pub async fn health_check(pool: &SqlitePool) -> DatabaseResult<bool> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(DatabaseError::Query)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_database_config_from_env_defaults() {
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("DATABASE_MAX_CONNECTIONS");
        }

        let config = DatabaseConfig::from_env().expect("Failed to create database config");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.database_url, "sqlite://siakad.db");
    }

    #[test]
    #[serial]
    fn test_database_config_from_env_overrides() {
        unsafe {
            env::set_var("DATABASE_URL", "sqlite://override.db");
            env::set_var("DATABASE_MAX_CONNECTIONS", "12");
        }

        let config = DatabaseConfig::from_env().expect("Failed to create database config");
        assert_eq!(config.database_url, "sqlite://override.db");
        assert_eq!(config.max_connections, 12);

        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("DATABASE_MAX_CONNECTIONS");
        }
    }

    #[tokio::test]
    async fn test_memory_pool_health() {
        let pool = init_memory_pool().await.expect("Failed to create pool");
        assert!(health_check(&pool).await.expect("Health check errored"));
    }
}
