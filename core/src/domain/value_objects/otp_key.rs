//! Cache key layout for OTP state.
//!
//! Every identity owns six independent entries, each with its own TTL:
//! - `otp:{identity}` - the live code
//! - `otp_cooldown:{identity}` - issuance throttle flag
//! - `otp_attempts:{identity}` - failed guesses against the live code
//! - `otp_fail_lock:{identity}` - verification lock flag
//! - `otp_request_count:{identity}` - issuance requests in the current window
//! - `otp_spam_lock:{identity}` - issuance lock flag

use es_shared::OtpConfig;

use super::identity::Identity;

/// Value written for flag entries; only presence matters
pub const LOCK_FLAG: &str = "true";

/// One of the six per-identity OTP entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpKey {
    Code,
    Cooldown,
    Attempts,
    FailLock,
    RequestCount,
    SpamLock,
}

impl OtpKey {
    /// All entries, in the order they are reported
    pub const ALL: [OtpKey; 6] = [
        OtpKey::Code,
        OtpKey::Cooldown,
        OtpKey::Attempts,
        OtpKey::FailLock,
        OtpKey::RequestCount,
        OtpKey::SpamLock,
    ];

    /// Key namespace segment
    pub fn purpose(self) -> &'static str {
        match self {
            OtpKey::Code => "otp",
            OtpKey::Cooldown => "otp_cooldown",
            OtpKey::Attempts => "otp_attempts",
            OtpKey::FailLock => "otp_fail_lock",
            OtpKey::RequestCount => "otp_request_count",
            OtpKey::SpamLock => "otp_spam_lock",
        }
    }

    /// TTL applied when the entry is written under `policy`
    pub fn ttl_secs(self, policy: &OtpConfig) -> u64 {
        match self {
            OtpKey::Code => policy.code_ttl_secs,
            OtpKey::Cooldown => policy.cooldown_secs,
            OtpKey::Attempts => policy.attempts_ttl_secs,
            OtpKey::FailLock => policy.fail_lock_secs,
            OtpKey::RequestCount => policy.request_window_secs,
            OtpKey::SpamLock => policy.spam_lock_secs,
        }
    }
}

/// Formats store keys, optionally under a deployment-wide prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpKeyspace {
    prefix: Option<String>,
}

impl OtpKeyspace {
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    /// `[prefix:]purpose:identity`
    pub fn key(&self, kind: OtpKey, identity: &Identity) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}:{}", prefix, kind.purpose(), identity.as_str()),
            None => format!("{}:{}", kind.purpose(), identity.as_str()),
        }
    }

    /// Every key owned by `identity`
    pub fn all(&self, identity: &Identity) -> Vec<String> {
        OtpKey::ALL
            .iter()
            .map(|kind| self.key(*kind, identity))
            .collect()
    }
}
