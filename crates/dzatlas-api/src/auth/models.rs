use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Caller identity (operator handle or service name)
    pub sub: String,
    /// Only "admin" passes the gateway's admin check
    pub role: String,
    /// expiration timestamp
    pub exp: i64,
    /// issued at timestamp
    pub iat: i64,
}

/// Resolved admin caller, available to admin task handlers.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub subject: String,
}
