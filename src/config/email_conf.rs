use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Email configuration for SMTP settings and notification addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port
    pub port: u16,
    /// SMTP username for authentication
    pub username: String,
    /// SMTP password for authentication
    pub password: String,
    /// true for implicit TLS (SSL), false for STARTTLS
    pub secure: bool,
    /// From email address
    pub from_email: String,
    /// From name (display name)
    pub from_name: String,
    /// Address receiving the admin alert for each submission
    pub admin_email: String,
    /// Display name of the admin / studio
    pub admin_name: String,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl EmailConfig {
    /// Create EmailConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");

        let host = env::var("EMAIL_HOST").map_err(|_| {
            error!("EMAIL_HOST environment variable not found");
            ConfigError::EnvVarNotFound("EMAIL_HOST".to_string())
        })?;
        debug!("SMTP host: {}", host);

        let port = env::var("EMAIL_PORT")
            .unwrap_or_else(|_| {
                warn!("EMAIL_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid EMAIL_PORT value");
                ConfigError::InvalidValue("Invalid EMAIL_PORT value".to_string())
            })?;
        debug!("SMTP port: {}", port);

        let username = env::var("EMAIL_USER").map_err(|_| {
            error!("EMAIL_USER environment variable not found");
            ConfigError::EnvVarNotFound("EMAIL_USER".to_string())
        })?;
        debug!("SMTP username: {}", username);

        let password = env::var("EMAIL_PASS").map_err(|_| {
            error!("EMAIL_PASS environment variable not found");
            ConfigError::EnvVarNotFound("EMAIL_PASS".to_string())
        })?;
        debug!("SMTP password: [REDACTED]");

        let secure = env::var("EMAIL_SECURE")
            .unwrap_or_else(|_| {
                warn!("EMAIL_SECURE not set, defaulting to false (STARTTLS)");
                "false".to_string()
            })
            .parse::<bool>()
            .unwrap_or(false);
        debug!("SMTP secure: {}", secure);

        let from_email = env::var("EMAIL_FROM").unwrap_or_else(|_| {
            warn!("EMAIL_FROM not set, using EMAIL_USER as the from address");
            username.clone()
        });
        debug!("From email: {}", from_email);

        let from_name = env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| {
            warn!("EMAIL_FROM_NAME not set, using default");
            "SDC Creative Studio".to_string()
        });
        debug!("From name: {}", from_name);

        let admin_email = env::var("ADMIN_EMAIL").map_err(|_| {
            error!("ADMIN_EMAIL environment variable not found");
            ConfigError::EnvVarNotFound("ADMIN_EMAIL".to_string())
        })?;
        debug!("Admin email: {}", admin_email);

        let admin_name = env::var("ADMIN_NAME").unwrap_or_else(|_| {
            warn!("ADMIN_NAME not set, using default");
            "SDC Creative Studio".to_string()
        });
        debug!("Admin name: {}", admin_name);

        let connection_timeout_secs = env::var("EMAIL_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("EMAIL_CONNECTION_TIMEOUT not set, defaulting to 30 seconds");
                "30".to_string()
            })
            .parse::<u64>()
            .unwrap_or(30);
        debug!("Connection timeout: {} seconds", connection_timeout_secs);

        let config = EmailConfig {
            host,
            port,
            username,
            password,
            secure,
            from_email,
            from_name,
            admin_email,
            admin_name,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: "test".to_string(),
            password: "test".to_string(),
            secure: false,
            from_email: "noreply@example.com".to_string(),
            from_name: "Test Studio".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_name: "Test Studio".to_string(),
            connection_timeout_secs: 5,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            error!("SMTP host is empty");
            return Err(ConfigError::ValidationError("SMTP host cannot be empty".to_string()));
        }

        if self.port == 0 {
            error!("SMTP port is 0");
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }

        if self.from_email.is_empty() || !self.from_email.contains('@') {
            error!("Invalid from email: {}", self.from_email);
            return Err(ConfigError::ValidationError("Invalid from email".to_string()));
        }

        if self.admin_email.is_empty() || !self.admin_email.contains('@') {
            error!("Invalid admin email: {}", self.admin_email);
            return Err(ConfigError::ValidationError("Invalid admin email".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("Connection timeout is 0");
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }

        Ok(())
    }

    /// Get SMTP server URL
    pub fn get_smtp_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: "".to_string(),
            password: "".to_string(),
            secure: false,
            from_email: "noreply@example.com".to_string(),
            from_name: "SDC Creative Studio".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_name: "SDC Creative Studio".to_string(),
            connection_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmailConfig::default();
        assert_eq!(config.host, "smtp.gmail.com");
        assert_eq!(config.port, 587);
        assert!(!config.secure);
    }

    #[test]
    fn test_test_config() {
        let config = EmailConfig::from_test_env();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 1025);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = EmailConfig::from_test_env();
        config.host = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = EmailConfig::from_test_env();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_admin_email() {
        let mut config = EmailConfig::from_test_env();
        config.admin_email = "not-an-email".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_get_smtp_url() {
        let config = EmailConfig::from_test_env();
        assert_eq!(config.get_smtp_url(), "localhost:1025");
    }
}
