use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

/// Database configuration for the SQLite store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite:database/bid_requests.db?mode=rwc`
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool, in seconds
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Create DatabaseConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading database configuration from environment variables");

        let url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            warn!("DATABASE_URL not set, defaulting to sqlite:database/bid_requests.db?mode=rwc");
            "sqlite:database/bid_requests.db?mode=rwc".to_string()
        });
        debug!("Database URL: {}", url);

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| {
                warn!("DATABASE_MAX_CONNECTIONS not set, defaulting to 5");
                "5".to_string()
            })
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidValue("Invalid DATABASE_MAX_CONNECTIONS value".to_string()))?;
        debug!("Max connections: {}", max_connections);

        let acquire_timeout_secs = env::var("DATABASE_ACQUIRE_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("DATABASE_ACQUIRE_TIMEOUT not set, defaulting to 30 seconds");
                "30".to_string()
            })
            .parse::<u64>()
            .unwrap_or(30);
        debug!("Acquire timeout: {} seconds", acquire_timeout_secs);

        let config = DatabaseConfig {
            url,
            max_connections,
            acquire_timeout_secs,
        };

        config.validate()?;
        info!("Database configuration loaded successfully");
        Ok(config)
    }

    /// Create DatabaseConfig for testing (in-memory store, single connection
    /// so the database survives for the whole pool lifetime)
    pub fn from_test_env() -> Self {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 5,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidationError("Database URL cannot be empty".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::ValidationError("Max connections cannot be 0".to_string()));
        }

        if self.acquire_timeout_secs == 0 {
            return Err(ConfigError::ValidationError("Acquire timeout cannot be 0".to_string()));
        }

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: "sqlite:database/bid_requests.db?mode=rwc".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}
