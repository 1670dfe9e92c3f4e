//! Store API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults.

use std::env;

use velora_core::SubGroupDeletePolicy;

/// Store API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// SQLite database file path
    pub database_path: String,

    /// JWT secret key for signing bearer tokens
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds
    pub token_lifetime_secs: i64,

    /// What happens to products when their subgroup is deleted
    pub subgroup_delete_policy: SubGroupDeletePolicy,

    /// Allowed CORS origin; None allows any origin (development)
    pub cors_allow_origin: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./velora.db".to_string()),

            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                // In production, this MUST be set via environment variable
                "velora-dev-secret-change-in-production".to_string()
            }),

            token_lifetime_secs: env::var("TOKEN_LIFETIME_SECS")
                .unwrap_or_else(|_| "1800".to_string()) // 30 minutes
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_LIFETIME_SECS".to_string()))?,

            subgroup_delete_policy: env::var("SUBGROUP_DELETE_POLICY")
                .unwrap_or_else(|_| "detach".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SUBGROUP_DELETE_POLICY".to_string()))?,

            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN").ok(),
        };

        Ok(config)
    }
}

impl Default for ApiConfig {
    /// Development defaults; used by tests.
    fn default() -> Self {
        ApiConfig {
            http_port: 8080,
            database_path: "./velora.db".to_string(),
            jwt_secret: "velora-test-secret".to_string(),
            token_lifetime_secs: 1800,
            subgroup_delete_policy: SubGroupDeletePolicy::Detach,
            cors_allow_origin: None,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.token_lifetime_secs, 1800);
        assert_eq!(config.subgroup_delete_policy, SubGroupDeletePolicy::Detach);
    }
}
