use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{MIGRATOR, config::ServerConfig, routes, state::AppState};
use common::database::{DatabaseConfig, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting SIAKAD API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    MIGRATOR
        .run(&pool)
        .await
        .map_err(common::error::DatabaseError::Migration)?;
    info!("Database migrations applied");

    let server_config = ServerConfig::from_env();
    let app_state = AppState::new(pool, server_config.session_ttl_secs);

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;
    info!("SIAKAD API listening on {}", server_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
