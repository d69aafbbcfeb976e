//! Application state and sub-state extractors.
//!
//! The state is split by credential level: the restricted repositories serve
//! public reads and the submission insert, the elevated repositories serve
//! admin tasks only. Handler wiring is the only place the elevated side is
//! reachable, and it sits behind the bearer check.

use dzatlas_core::Config;
use dzatlas_db::{EntityRepository, LookupRepository};
use sqlx::PgPool;
use std::sync::Arc;

/// Both credential levels' repositories.
#[derive(Clone)]
pub struct DbState {
    /// Restricted pool: public reads and the submission insert.
    pub public_entities: EntityRepository,
    pub public_lookups: LookupRepository,
    /// Elevated pool: admin tasks only, gated behind the bearer check.
    pub admin_entities: EntityRepository,
    pub admin_lookups: LookupRepository,
}

impl DbState {
    pub fn new(public_pool: PgPool, admin_pool: PgPool) -> Self {
        Self {
            public_entities: EntityRepository::new(public_pool.clone()),
            public_lookups: LookupRepository::new(public_pool),
            admin_entities: EntityRepository::new(admin_pool.clone()),
            admin_lookups: LookupRepository::new(admin_pool),
        }
    }
}

/// Main application state: repositories plus configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, public_pool: PgPool, admin_pool: PgPool) -> Self {
        Self {
            db: DbState::new(public_pool, admin_pool),
            config,
        }
    }
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
