//! Database setup and initialization

use anyhow::{Context, Result};
use dzatlas_core::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::time::Duration;

/// Connect both credential levels and run migrations.
///
/// Returns (restricted, elevated). The restricted pool serves public reads
/// and the submission insert; the elevated pool serves admin tasks and owns
/// schema migrations. With no ADMIN_DATABASE_URL configured both pools point
/// at the same role, which is fine for development.
pub async fn setup_database(config: &Config) -> Result<(PgPool, PgPool)> {
    tracing::info!("Connecting to database...");

    let public_pool = pool_for(config, &config.database_url).await?;
    let admin_pool = pool_for(config, config.admin_database_url()).await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        elevated_role = config.admin_database_url.is_some(),
        "Database connected successfully"
    );

    // Run pending migrations on startup (path: workspace migrations/ from crate root)
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&admin_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok((public_pool, admin_pool))
}

async fn pool_for(config: &Config, url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(url)
        .await
        .context("Failed to connect to database")
}
