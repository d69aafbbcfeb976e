//! Admin authentication.
//!
//! Every `admin-*` task resolves the bearer credential to an identity before
//! touching data; there is no unauthenticated admin path.

pub mod bearer;
pub mod models;

pub use bearer::{issue_admin_token, resolve_admin};
pub use models::{AdminIdentity, JwtClaims};
