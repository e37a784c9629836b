//! Redis-backed key-value store for OTP state

use async_trait::async_trait;

use es_core::errors::StoreError;
use es_core::services::otp::KeyValueStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// [`KeyValueStore`] over a [`RedisClient`]
///
/// Expiry is handled natively by Redis.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    client: RedisClient,
}

impl RedisKeyValueStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.client.get(key).await?)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        Ok(self.client.set_with_expiry(key, value, ttl_secs).await?)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError> {
        Ok(self.client.delete(keys).await?)
    }

    async fn incr(&self, key: &str, ttl_secs: u64) -> Result<i64, StoreError> {
        Ok(self.client.increment_with_expiry(key, ttl_secs).await?)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.client.ttl(key).await?)
    }
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(e)
                if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() =>
            {
                StoreError::Connection {
                    message: e.to_string(),
                }
            }
            other => StoreError::Command {
                message: other.to_string(),
            },
        }
    }
}
