//! Read-only snapshot of the OTP entries owned by one identity.

use serde::{Deserialize, Serialize};

/// Presence and remaining lifetime of one store entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryState {
    /// Seconds until the entry expires, `None` when absent
    pub ttl_secs: Option<u64>,
}

impl EntryState {
    pub fn absent() -> Self {
        Self { ttl_secs: None }
    }

    pub fn present(ttl_secs: u64) -> Self {
        Self {
            ttl_secs: Some(ttl_secs),
        }
    }

    pub fn is_present(&self) -> bool {
        self.ttl_secs.is_some()
    }
}

/// Snapshot of every OTP entry for an identity
///
/// The code itself is never part of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpStatus {
    pub code: EntryState,
    pub cooldown: EntryState,
    pub attempts: EntryState,
    pub fail_lock: EntryState,
    pub request_count: EntryState,
    pub spam_lock: EntryState,

    /// Failed guesses against the live code
    pub failed_attempts: u32,

    /// Issuance requests in the current window
    pub requests_in_window: u32,
}

impl OtpStatus {
    /// Whether a code is currently live
    pub fn has_active_code(&self) -> bool {
        self.code.is_present()
    }

    /// Whether either lock flag is set
    pub fn is_locked(&self) -> bool {
        self.fail_lock.is_present() || self.spam_lock.is_present()
    }

    /// Whether no entry exists at all
    pub fn is_clear(&self) -> bool {
        [
            self.code,
            self.cooldown,
            self.attempts,
            self.fail_lock,
            self.request_count,
            self.spam_lock,
        ]
        .iter()
        .all(|entry| !entry.is_present())
    }
}
