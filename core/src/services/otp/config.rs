//! Configuration for the OTP guard

use es_shared::{CacheConfig, OtpConfig};

/// Policy and key layout used by [`OtpGuard`](super::OtpGuard)
#[derive(Debug, Clone, Default)]
pub struct OtpGuardConfig {
    /// Lifetimes and thresholds
    pub policy: OtpConfig,
    /// Deployment-wide key prefix
    pub key_prefix: Option<String>,
}

impl OtpGuardConfig {
    pub fn new(policy: OtpConfig) -> Self {
        Self {
            policy,
            key_prefix: None,
        }
    }

    /// Combine the OTP policy with the cache key prefix
    pub fn from_configs(policy: &OtpConfig, cache: &CacheConfig) -> Self {
        Self {
            policy: policy.clone(),
            key_prefix: cache.key_prefix.clone(),
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}
