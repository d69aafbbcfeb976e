//! Shared API constants.

/// The single gateway route; task names select the operation.
pub const API_PATH: &str = "/api";

/// Request bodies larger than this are rejected before dispatch.
pub const MAX_BODY_BYTES: usize = 64 * 1024;
