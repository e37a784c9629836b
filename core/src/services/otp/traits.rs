//! Collaborator traits for the OTP guard

use async_trait::async_trait;

use crate::domain::value_objects::{EmailTemplate, Identity};
use crate::errors::{DeliveryError, StoreError};

use super::types::OtpMessage;

/// Key-value store with per-key expiry
///
/// Each call must be atomic on its own; the guard never needs a
/// multi-key transaction.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a live value
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write a value that expires after `ttl_secs`, replacing any previous one
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError>;
    /// Remove keys, returning how many existed
    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError>;
    /// Atomically increment a counter (absent counts as 0) and reset its TTL
    async fn incr(&self, key: &str, ttl_secs: u64) -> Result<i64, StoreError>;
    /// Remaining lifetime in seconds, `None` when the key is absent
    async fn ttl(&self, key: &str) -> Result<Option<u64>, StoreError>;
}

/// Channel that delivers an issued code to its owner
#[async_trait]
pub trait OtpDelivery: Send + Sync {
    /// Deliver `message` to `identity` using `template`
    async fn send(
        &self,
        identity: &Identity,
        template: EmailTemplate,
        message: &OtpMessage,
    ) -> Result<(), DeliveryError>;
}
