//! SIAKAD backend service
//!
//! School academic administration: user accounts, teachers, classes,
//! students, class-enrollment requests, grade summaries and dashboard
//! statistics, served as JSON over HTTP.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod policy;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

/// Embedded schema migrations, applied at startup and by the test harness.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
