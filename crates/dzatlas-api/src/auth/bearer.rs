//! Bearer token resolution for admin tasks.

use axum::http::{header, HeaderMap};
use chrono::Utc;
use dzatlas_core::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::models::{AdminIdentity, JwtClaims};

const BEARER_PREFIX: &str = "Bearer ";
const ADMIN_ROLE: &str = "admin";

/// Resolve the Authorization header to an admin identity. Rejects with
/// Unauthorized before any store access when the header is missing, is not a
/// bearer token, fails signature/expiry validation, or carries a non-admin
/// role.
pub fn resolve_admin(headers: &HeaderMap, jwt_secret: &str) -> Result<AdminIdentity, AppError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AppError::Unauthorized("Authorization header must be a Bearer token".to_string())
    })?;

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|err| AppError::Unauthorized(format!("Invalid bearer token: {}", err)))?;

    if data.claims.role != ADMIN_ROLE {
        return Err(AppError::Unauthorized("Admin role required".to_string()));
    }

    Ok(AdminIdentity {
        subject: data.claims.sub,
    })
}

/// Mint an admin token. Used by operator tooling and the test helpers.
pub fn issue_admin_token(
    jwt_secret: &str,
    subject: &str,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
        sub: subject.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: now + ttl_hours * 3600,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|err| AppError::Internal(format!("Failed to sign token: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret";

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_issue_and_resolve_round_trip() {
        let token = issue_admin_token(SECRET, "ops@dzatlas", 1).unwrap();
        let identity = resolve_admin(&headers_with(&token), SECRET).unwrap();
        assert_eq!(identity.subject, "ops@dzatlas");
    }

    #[test]
    fn test_missing_header_rejected() {
        let err = resolve_admin(&HeaderMap::new(), SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_non_bearer_header_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(matches!(
            resolve_admin(&headers, SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_admin_token(SECRET, "ops@dzatlas", 1).unwrap();
        assert!(matches!(
            resolve_admin(&headers_with(&token), "other-secret"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_non_admin_role_rejected() {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: "viewer@dzatlas".to_string(),
            role: "viewer".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            resolve_admin(&headers_with(&token), SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: "ops@dzatlas".to_string(),
            role: "admin".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            resolve_admin(&headers_with(&token), SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }
}
