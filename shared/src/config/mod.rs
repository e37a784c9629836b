//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Key-value store backend and Redis connection settings
//! - `email` - OTP delivery over SMTP
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP lifetimes, cooldowns and lockout thresholds

pub mod cache;
pub mod email;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheConfig, CacheType};
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Key-value store configuration
    pub cache: CacheConfig,

    /// OTP policy
    #[serde(default)]
    pub otp: OtpConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            cache: CacheConfig::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    ///
    /// Development runs without external services: in-memory store and
    /// a mock mailer that logs codes.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cache: CacheConfig {
                cache_type: CacheType::Memory,
                ..CacheConfig::default()
            },
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            cache: CacheConfig::from_env(),
            otp: OtpConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_overrides(),
        }
    }

    /// Validate all sub-configurations
    pub fn validate(&self) -> Result<(), String> {
        self.otp.validate()?;
        self.email.validate()?;
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
