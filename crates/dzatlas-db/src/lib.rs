//! Dzatlas database layer
//!
//! Repositories for the Entity Store and Lookup Store, plus reference-data
//! seeding. All access goes through a `PgPool`; the API crate holds two
//! pools (restricted and elevated) and instantiates a repository per
//! credential level.

pub mod db;

pub use db::{EntityRepository, LookupRepository};
pub use db::seed::seed_reference_data;
