//! Database repositories for the data access layer
//!
//! Repositories are organized by store: entities/ (the primary record table
//! and its classification joins) and lookups/ (the allow-listed reference
//! tables). Seeding of the fixed reference data lives in seed/.

mod entities;
mod lookups;
pub mod seed;

pub use entities::EntityRepository;
pub use lookups::LookupRepository;
