//! OTP error taxonomy.

mod types;

#[cfg(test)]
mod tests;

pub use types::{BlockReason, DeliveryError, InvalidReason, StoreError};

use es_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Every way an OTP operation can fail
///
/// The `Display` output is the user-facing message; request handlers can
/// render it as is or use [`OtpError::error_code`] for their own copy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("{}", blocked_message(.reason))]
    IssuanceBlocked { reason: BlockReason },

    #[error("Failed to send OTP: {message}")]
    IssuanceFailed { message: String },

    #[error("{}", blocked_message(.reason))]
    VerificationBlocked { reason: BlockReason },

    #[error("{}", invalid_message(.reason, .attempts_remaining))]
    VerificationInvalid {
        reason: InvalidReason,
        attempts_remaining: Option<u32>,
    },

    #[error("Service temporarily unavailable: {message}")]
    Infrastructure { message: String },

    #[error("Identity must not be empty")]
    InvalidIdentity,
}

fn blocked_message(reason: &BlockReason) -> &'static str {
    match reason {
        BlockReason::Cooldown => "You can only request 1 OTP per minute",
        BlockReason::SpamLocked => "Too many OTP requests. Please try again after 1 hour",
        BlockReason::FailLocked => {
            "Account locked due to multiple failed attempts. Please try again after 30 minutes"
        }
    }
}

fn invalid_message(reason: &InvalidReason, attempts_remaining: &Option<u32>) -> String {
    match (*reason, *attempts_remaining) {
        (InvalidReason::WrongCode, Some(n)) => format!("Incorrect OTP. {} attempts left", n),
        (InvalidReason::WrongCode, None) => "Incorrect OTP".to_string(),
        (InvalidReason::NoActiveCode, _) => "OTP invalid or expired".to_string(),
    }
}

impl OtpError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::IssuanceBlocked { reason } | OtpError::VerificationBlocked { reason } => {
                match reason {
                    BlockReason::Cooldown => error_codes::OTP_COOLDOWN,
                    BlockReason::SpamLocked => error_codes::OTP_SPAM_LOCKED,
                    BlockReason::FailLocked => error_codes::OTP_FAIL_LOCKED,
                }
            }
            OtpError::IssuanceFailed { .. } => error_codes::OTP_DELIVERY_FAILED,
            OtpError::VerificationInvalid { reason, .. } => match reason {
                InvalidReason::NoActiveCode => error_codes::OTP_EXPIRED,
                InvalidReason::WrongCode => error_codes::OTP_INVALID,
            },
            OtpError::Infrastructure { .. } => error_codes::CACHE_ERROR,
            OtpError::InvalidIdentity => error_codes::VALIDATION_ERROR,
        }
    }

    /// Whether the caller may retry the same request later and succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OtpError::IssuanceBlocked { .. }
                | OtpError::VerificationBlocked { .. }
                | OtpError::IssuanceFailed { .. }
                | OtpError::Infrastructure { .. }
        )
    }

    /// Block reason, if the request was refused outright
    pub fn block_reason(&self) -> Option<BlockReason> {
        match self {
            OtpError::IssuanceBlocked { reason } | OtpError::VerificationBlocked { reason } => {
                Some(*reason)
            }
            _ => None,
        }
    }
}

impl From<StoreError> for OtpError {
    fn from(err: StoreError) -> Self {
        OtpError::Infrastructure {
            message: err.to_string(),
        }
    }
}

impl From<DeliveryError> for OtpError {
    fn from(err: DeliveryError) -> Self {
        OtpError::IssuanceFailed {
            message: err.to_string(),
        }
    }
}

impl IntoErrorResponse for OtpError {
    fn to_error_response(&self) -> ErrorResponse {
        // Infrastructure details stay in logs
        let message = match self {
            OtpError::Infrastructure { .. } => {
                "Service temporarily unavailable. Please try again later".to_string()
            }
            OtpError::IssuanceFailed { .. } => {
                "Failed to send OTP. Please try again later".to_string()
            }
            other => other.to_string(),
        };

        let response = ErrorResponse::new(self.error_code(), message);
        match self {
            OtpError::VerificationInvalid {
                attempts_remaining: Some(n),
                ..
            } => response.add_detail("attempts_remaining", n),
            OtpError::IssuanceBlocked { reason } | OtpError::VerificationBlocked { reason } => {
                response.add_detail("reason", reason)
            }
            _ => response,
        }
    }
}

impl From<OtpError> for ErrorResponse {
    fn from(err: OtpError) -> Self {
        err.to_error_response()
    }
}

/// Result alias for OTP operations
pub type OtpResult<T> = Result<T, OtpError>;
