use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

/// Rate limiting configuration for the submission endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Trailing window length in seconds
    pub window_seconds: u64,
    /// Maximum accepted submissions per source address per window
    pub max_requests: u32,
}

impl RateLimitConfig {
    /// Create RateLimitConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading rate limit configuration from environment variables");

        let window_seconds = env::var("RATE_LIMIT_WINDOW_SECONDS")
            .unwrap_or_else(|_| {
                warn!("RATE_LIMIT_WINDOW_SECONDS not set, defaulting to 900 (15 minutes)");
                "900".to_string()
            })
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("Invalid RATE_LIMIT_WINDOW_SECONDS value".to_string()))?;
        debug!("Rate limit window: {} seconds", window_seconds);

        let max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| {
                warn!("RATE_LIMIT_MAX_REQUESTS not set, defaulting to 5");
                "5".to_string()
            })
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidValue("Invalid RATE_LIMIT_MAX_REQUESTS value".to_string()))?;
        debug!("Rate limit max requests: {}", max_requests);

        let config = RateLimitConfig {
            window_seconds,
            max_requests,
        };

        config.validate()?;
        info!("Rate limit configuration loaded successfully");
        Ok(config)
    }

    /// Create RateLimitConfig for testing
    pub fn from_test_env() -> Self {
        RateLimitConfig {
            window_seconds: 900,
            max_requests: 5,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_seconds == 0 {
            return Err(ConfigError::ValidationError("Rate limit window cannot be 0".to_string()));
        }

        if self.max_requests == 0 {
            return Err(ConfigError::ValidationError("Rate limit max requests cannot be 0".to_string()));
        }

        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            window_seconds: 900,
            max_requests: 5,
        }
    }
}
