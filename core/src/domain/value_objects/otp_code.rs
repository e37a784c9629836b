//! Numeric one-time codes.

use std::fmt;

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

use es_shared::OtpConfig;

/// A numeric one-time password
///
/// Generated codes are uniform over all `length`-digit numbers without a
/// leading zero, e.g. `1000..=9999` for the default width of 4.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a new code of `length` digits using the OS CSPRNG
    ///
    /// `length` is clamped to the supported range
    /// (`OtpConfig::MIN_CODE_LENGTH..=OtpConfig::MAX_CODE_LENGTH`).
    pub fn generate(length: u32) -> Self {
        let length = length.clamp(OtpConfig::MIN_CODE_LENGTH, OtpConfig::MAX_CODE_LENGTH);
        let low = 10u32.pow(length - 1);
        let high = 10u32.pow(length);
        let value = OsRng.gen_range(low..high);
        Self(value.to_string())
    }

    /// Wrap a code read back from the store
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact match against a submitted code, compared in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        if self.0.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(****)")
    }
}
