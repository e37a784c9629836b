//! Cache module for OTP state
//!
//! Key-value stores behind the `KeyValueStore` trait: Redis for deployed
//! environments, in-memory for development and tests.

pub mod memory_store;
#[cfg(feature = "redis-cache")]
pub mod redis_client;
#[cfg(feature = "redis-cache")]
pub mod redis_store;


use std::sync::Arc;

use es_core::services::otp::KeyValueStore;
use es_shared::{CacheConfig, CacheType};

use crate::InfrastructureError;

pub use memory_store::MemoryKeyValueStore;
#[cfg(feature = "redis-cache")]
pub use redis_client::RedisClient;
#[cfg(feature = "redis-cache")]
pub use redis_store::RedisKeyValueStore;

/// Create the store selected by `config.cache_type`
pub async fn create_store(config: &CacheConfig) -> Result<Arc<dyn KeyValueStore>, InfrastructureError> {
    match config.cache_type {
        CacheType::Redis => create_redis(config).await,
        CacheType::Memory => {
            tracing::warn!("Using in-memory OTP store; state is lost on restart and not shared");
            Ok(Arc::new(MemoryKeyValueStore::new()))
        }
    }
}

#[cfg(feature = "redis-cache")]
async fn create_redis(config: &CacheConfig) -> Result<Arc<dyn KeyValueStore>, InfrastructureError> {
    let client = RedisClient::new(config.clone()).await?;
    if !client.health_check().await? {
        return Err(InfrastructureError::Config(
            "Redis health check returned an unexpected response".to_string(),
        ));
    }
    Ok(Arc::new(RedisKeyValueStore::new(client)))
}

#[cfg(not(feature = "redis-cache"))]
async fn create_redis(_config: &CacheConfig) -> Result<Arc<dyn KeyValueStore>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "Redis store requires the `redis-cache` feature".to_string(),
    ))
}
