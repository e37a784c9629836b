//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Key-value store configuration
///
/// The OTP guard keeps all of its state in a single key-value store. Redis is
/// the production backend; the in-memory backend is for development and tests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Backend selection
    #[serde(default = "default_cache_type")]
    pub cache_type: CacheType,

    /// Redis connection URL
    ///
    /// All commands share one multiplexed connection, so there is no pool size.
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds
    pub response_timeout: u64,

    /// Prefix prepended to every key, e.g. `eshop:otp:{identity}`
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,

    /// Maximum attempts for a Redis command on transient errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubles per attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: default_cache_type(),
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 5,
            key_prefix: None,
            database: 0,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let url = std::env::var("REDIS_URL").unwrap_or(defaults.url);
        let cache_type = std::env::var("CACHE_TYPE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.cache_type);
        let key_prefix = std::env::var("CACHE_KEY_PREFIX")
            .ok()
            .filter(|prefix| !prefix.is_empty());

        Self {
            cache_type,
            url,
            key_prefix,
            database: env_or("REDIS_DATABASE", defaults.database).min(15),
            max_retries: env_or("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
            ..defaults
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }
}

/// Cache type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Redis,
    Memory,
}

impl std::str::FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheType::Redis),
            "memory" | "in-memory" => Ok(CacheType::Memory),
            _ => Err(format!("Invalid cache type: {}", s)),
        }
    }
}

fn default_cache_type() -> CacheType {
    CacheType::Redis
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.cache_type, CacheType::Redis);
        assert_eq!(config.database, 0);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_cache_config_with_prefix() {
        let config = CacheConfig::new("redis://cache:6379")
            .with_prefix("eshop")
            .with_database(20);

        assert_eq!(config.key_prefix.as_deref(), Some("eshop"));
        assert_eq!(config.url, "redis://cache:6379");
        assert_eq!(config.database, 15);
    }

    #[test]
    fn test_cache_type_parsing() {
        assert_eq!("Redis".parse::<CacheType>().unwrap(), CacheType::Redis);
        assert_eq!("in-memory".parse::<CacheType>().unwrap(), CacheType::Memory);
        assert!("memcached".parse::<CacheType>().is_err());
    }

    #[test]
    fn test_cache_config_has_no_pool_size() {
        let json = serde_json::to_value(CacheConfig::default()).unwrap();
        assert!(json.get("max_connections").is_none());

        let config: CacheConfig = serde_json::from_str(
            r#"{"url": "redis://cache:6379", "connection_timeout": 2, "response_timeout": 2}"#,
        )
        .unwrap();
        assert_eq!(config.url, "redis://cache:6379");
        assert_eq!(config.cache_type, CacheType::Redis);
    }
}
