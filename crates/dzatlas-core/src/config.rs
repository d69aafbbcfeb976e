//! Configuration module
//!
//! Environment-driven configuration for the API and client tooling, covering
//! server, database pools (restricted and elevated), auth, and seeding.

use std::env;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    /// Restricted connection string: public reads and the submission insert.
    pub database_url: String,
    /// Elevated connection string for admin tasks. Falls back to
    /// `database_url` when unset.
    pub admin_database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub environment: String,
    pub seed_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_origins,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            admin_database_url: env::var("ADMIN_DATABASE_URL").ok(),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret".to_string()),
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or_else(|_| "development".to_string()),
            seed_on_startup: env::var("SEED_ON_STARTUP")
                .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
                .unwrap_or(false),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Elevated connection string, falling back to the restricted one.
    pub fn admin_database_url(&self) -> &str {
        self.admin_database_url
            .as_deref()
            .unwrap_or(&self.database_url)
    }

    /// Fail-fast startup checks.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }
        if self.is_production() && self.jwt_secret == "dev-secret" {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            database_url: "postgres://localhost/dzatlas".to_string(),
            admin_database_url: None,
            db_max_connections: 20,
            db_timeout_seconds: 30,
            jwt_secret: "dev-secret".to_string(),
            environment: "development".to_string(),
            seed_on_startup: false,
        }
    }

    #[test]
    fn test_admin_url_falls_back_to_restricted() {
        let mut config = test_config();
        assert_eq!(config.admin_database_url(), "postgres://localhost/dzatlas");
        config.admin_database_url = Some("postgres://elevated/dzatlas".to_string());
        assert_eq!(config.admin_database_url(), "postgres://elevated/dzatlas");
    }

    #[test]
    fn test_validate_rejects_default_secret_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());
        config.jwt_secret = "s3cret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }
}
