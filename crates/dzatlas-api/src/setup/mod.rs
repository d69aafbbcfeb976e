//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use dzatlas_core::Config;
use std::sync::Arc;

/// Initialize the application: pools, migrations, optional seeding, state,
/// and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    config.validate()?;

    let (public_pool, admin_pool) = database::setup_database(&config).await?;

    if config.seed_on_startup {
        dzatlas_db::seed_reference_data(&admin_pool)
            .await
            .map_err(|err| anyhow::anyhow!("Failed to seed reference data: {err}"))?;
    }

    let state = Arc::new(AppState::new(config.clone(), public_pool, admin_pool));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
