//! Outcomes and messages of OTP operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{BlockReason, InvalidReason, OtpError, OtpResult};

/// Whether a code may be issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceDecision {
    Allowed,
    Blocked(BlockReason),
}

impl IssuanceDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, IssuanceDecision::Allowed)
    }

    /// Map a block to [`OtpError::IssuanceBlocked`]
    pub fn into_result(self) -> OtpResult<()> {
        match self {
            IssuanceDecision::Allowed => Ok(()),
            IssuanceDecision::Blocked(reason) => Err(OtpError::IssuanceBlocked { reason }),
        }
    }
}

/// Result of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; all state for the identity was cleared
    Verified,
    Blocked(BlockReason),
    Invalid {
        reason: InvalidReason,
        attempts_remaining: Option<u32>,
    },
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Map anything but success to the matching [`OtpError`]
    pub fn into_result(self) -> OtpResult<()> {
        match self {
            VerifyOutcome::Verified => Ok(()),
            VerifyOutcome::Blocked(reason) => Err(OtpError::VerificationBlocked { reason }),
            VerifyOutcome::Invalid {
                reason,
                attempts_remaining,
            } => Err(OtpError::VerificationInvalid {
                reason,
                attempts_remaining,
            }),
        }
    }
}

/// Data handed to the delivery channel for rendering
///
/// Serializes with the field names the templates use (`name`, `otp`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpMessage {
    /// Recipient display name
    #[serde(rename = "name")]
    pub display_name: String,
    /// The issued code
    #[serde(rename = "otp")]
    pub code: String,
    /// Code lifetime, rounded up to whole minutes
    pub expires_in_minutes: u64,
}

impl OtpMessage {
    pub fn new(display_name: impl Into<String>, code: impl Into<String>, expires_in_minutes: u64) -> Self {
        Self {
            display_name: display_name.into(),
            code: code.into(),
            expires_in_minutes,
        }
    }
}

impl fmt::Debug for OtpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpMessage")
            .field("display_name", &self.display_name)
            .field("code", &"****")
            .field("expires_in_minutes", &self.expires_in_minutes)
            .finish()
    }
}
