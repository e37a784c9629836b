//! In-memory key-value store for development and tests
//!
//! Entries expire lazily: an expired entry is treated as absent on read and
//! removed on the next write that touches it or on [`MemoryKeyValueStore::purge_expired`].
//! Deadlines use the tokio clock, so paused-time tests can advance it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use es_core::errors::StoreError;
use es_core::services::otp::KeyValueStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn new(value: String, ttl_secs: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }

    fn remaining_secs(&self, now: Instant) -> u64 {
        let remaining = self.expires_at.saturating_duration_since(now);
        // Round up so a fresh entry reports its full TTL
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }
}

/// [`KeyValueStore`] held in process memory
///
/// Every operation holds the lock for its whole duration, so each call is
/// atomic. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            debug!(purged = purged, "Purged expired in-memory entries");
        }
        purged
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Entry::new(value.to_string(), ttl_secs));
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let removed = keys
            .iter()
            .filter_map(|key| entries.remove(key))
            .filter(|entry| entry.is_live(now))
            .count();
        Ok(removed as u64)
    }

    async fn incr(&self, key: &str, ttl_secs: u64) -> Result<i64, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let current = match entries.get(key).filter(|entry| entry.is_live(now)) {
            Some(entry) => entry.value.parse::<i64>().map_err(|_| StoreError::Corrupt {
                key: key.to_string(),
                value: entry.value.clone(),
            })?,
            None => 0,
        };

        let next = current + 1;
        entries.insert(key.to_string(), Entry::new(next.to_string(), ttl_secs));
        Ok(next)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.remaining_secs(now)))
    }
}
