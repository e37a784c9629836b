//! OTP policy configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetimes and thresholds for OTP issuance and verification
///
/// All durations are in seconds. The defaults are the production policy:
/// 4-digit codes valid for 5 minutes, one code per minute, three codes per
/// rolling hour, three wrong guesses per code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: u32,

    /// How long an issued code stays valid
    #[serde(default = "default_code_ttl")]
    pub code_ttl_secs: u64,

    /// Minimum gap between two issued codes
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,

    /// Lifetime of the failed-attempt counter (refreshed on every failure)
    #[serde(default = "default_attempts_ttl")]
    pub attempts_ttl_secs: u64,

    /// Wrong guesses per code before verification is locked
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,

    /// Duration of the verification lock
    #[serde(default = "default_fail_lock")]
    pub fail_lock_secs: u64,

    /// Issuance requests allowed per window
    #[serde(default = "default_max_requests")]
    pub max_requests_per_window: u32,

    /// Length of the issuance request window
    #[serde(default = "default_request_window")]
    pub request_window_secs: u64,

    /// Duration of the issuance lock
    #[serde(default = "default_spam_lock")]
    pub spam_lock_secs: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            code_ttl_secs: default_code_ttl(),
            cooldown_secs: default_cooldown(),
            attempts_ttl_secs: default_attempts_ttl(),
            max_failed_attempts: default_max_failed_attempts(),
            fail_lock_secs: default_fail_lock(),
            max_requests_per_window: default_max_requests(),
            request_window_secs: default_request_window(),
            spam_lock_secs: default_spam_lock(),
        }
    }
}

impl OtpConfig {
    /// Smallest supported code width
    pub const MIN_CODE_LENGTH: u32 = 4;
    /// Largest supported code width (fits in a `u32`)
    pub const MAX_CODE_LENGTH: u32 = 9;

    /// Create from environment variables
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            code_length: env_or("OTP_CODE_LENGTH", d.code_length),
            code_ttl_secs: env_or("OTP_CODE_TTL_SECS", d.code_ttl_secs),
            cooldown_secs: env_or("OTP_COOLDOWN_SECS", d.cooldown_secs),
            attempts_ttl_secs: env_or("OTP_ATTEMPTS_TTL_SECS", d.attempts_ttl_secs),
            max_failed_attempts: env_or("OTP_MAX_FAILED_ATTEMPTS", d.max_failed_attempts),
            fail_lock_secs: env_or("OTP_FAIL_LOCK_SECS", d.fail_lock_secs),
            max_requests_per_window: env_or("OTP_MAX_REQUESTS_PER_WINDOW", d.max_requests_per_window),
            request_window_secs: env_or("OTP_REQUEST_WINDOW_SECS", d.request_window_secs),
            spam_lock_secs: env_or("OTP_SPAM_LOCK_SECS", d.spam_lock_secs),
        }
    }

    /// Configuration for development, identical to production
    pub fn development() -> Self {
        Self::default()
    }

    /// Minutes a code stays valid, rounded up, for user-facing messages
    pub fn code_ttl_minutes(&self) -> u64 {
        self.code_ttl_secs.div_ceil(60)
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        if !(Self::MIN_CODE_LENGTH..=Self::MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(format!(
                "OTP code length must be between {} and {}, got {}",
                Self::MIN_CODE_LENGTH,
                Self::MAX_CODE_LENGTH,
                self.code_length
            ));
        }

        let durations = [
            ("code_ttl_secs", self.code_ttl_secs),
            ("cooldown_secs", self.cooldown_secs),
            ("attempts_ttl_secs", self.attempts_ttl_secs),
            ("fail_lock_secs", self.fail_lock_secs),
            ("request_window_secs", self.request_window_secs),
            ("spam_lock_secs", self.spam_lock_secs),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, secs)| *secs == 0) {
            return Err(format!("OTP {} must be greater than zero", name));
        }

        if self.max_failed_attempts == 0 {
            return Err("OTP max_failed_attempts must be greater than zero".to_string());
        }
        if self.max_requests_per_window == 0 {
            return Err("OTP max_requests_per_window must be greater than zero".to_string());
        }

        Ok(())
    }
}

fn default_code_length() -> u32 {
    4
}

fn default_code_ttl() -> u64 {
    300 // 5 minutes
}

fn default_cooldown() -> u64 {
    60
}

fn default_attempts_ttl() -> u64 {
    300
}

fn default_max_failed_attempts() -> u32 {
    3
}

fn default_fail_lock() -> u64 {
    1800 // 30 minutes
}

fn default_max_requests() -> u32 {
    3
}

fn default_request_window() -> u64 {
    3600 // 1 hour
}

fn default_spam_lock() -> u64 {
    3600
}
