//! Dzatlas API Library
//!
//! This crate provides the Query Gateway: a single task-dispatch endpoint,
//! the admin bearer check, and the application setup.

// Module declarations
mod api_doc;
mod handlers;
mod telemetry;

// Public modules
pub mod auth;
pub mod constants;
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use telemetry::init_telemetry;
