//! Tests for the OTP error taxonomy

use es_shared::{ErrorResponse, IntoErrorResponse};

use crate::errors::{BlockReason, DeliveryError, InvalidReason, OtpError, StoreError};

#[test]
fn test_blocked_messages() {
    let cooldown = OtpError::IssuanceBlocked {
        reason: BlockReason::Cooldown,
    };
    assert_eq!(cooldown.to_string(), "You can only request 1 OTP per minute");
    assert_eq!(cooldown.error_code(), "OTP_COOLDOWN");

    let spam = OtpError::IssuanceBlocked {
        reason: BlockReason::SpamLocked,
    };
    assert!(spam.to_string().contains("Too many OTP requests"));
    assert_eq!(spam.error_code(), "OTP_SPAM_LOCKED");

    let locked = OtpError::VerificationBlocked {
        reason: BlockReason::FailLocked,
    };
    assert!(locked.to_string().contains("multiple failed attempts"));
    assert_eq!(locked.error_code(), "OTP_FAIL_LOCKED");
}

#[test]
fn test_invalid_messages() {
    let wrong = OtpError::VerificationInvalid {
        reason: InvalidReason::WrongCode,
        attempts_remaining: Some(2),
    };
    assert_eq!(wrong.to_string(), "Incorrect OTP. 2 attempts left");
    assert_eq!(wrong.error_code(), "OTP_INVALID");

    let expired = OtpError::VerificationInvalid {
        reason: InvalidReason::NoActiveCode,
        attempts_remaining: None,
    };
    assert_eq!(expired.to_string(), "OTP invalid or expired");
    assert_eq!(expired.error_code(), "OTP_EXPIRED");
}

#[test]
fn test_collaborator_errors_convert() {
    let err: OtpError = StoreError::Connection {
        message: "refused".to_string(),
    }
    .into();
    assert!(matches!(err, OtpError::Infrastructure { .. }));
    assert_eq!(err.error_code(), "CACHE_ERROR");
    assert!(err.is_transient());

    let err: OtpError = DeliveryError::Transport {
        message: "timeout".to_string(),
    }
    .into();
    assert!(matches!(err, OtpError::IssuanceFailed { .. }));
    assert_eq!(err.error_code(), "OTP_DELIVERY_FAILED");
}

#[test]
fn test_block_reason_accessor() {
    let err = OtpError::IssuanceBlocked {
        reason: BlockReason::SpamLocked,
    };
    assert_eq!(err.block_reason(), Some(BlockReason::SpamLocked));
    assert_eq!(OtpError::InvalidIdentity.block_reason(), None);
    assert!(!OtpError::InvalidIdentity.is_transient());
}

#[test]
fn test_error_response_carries_attempts() {
    let response: ErrorResponse = OtpError::VerificationInvalid {
        reason: InvalidReason::WrongCode,
        attempts_remaining: Some(1),
    }
    .into();

    assert_eq!(response.error, "OTP_INVALID");
    assert_eq!(response.message, "Incorrect OTP. 1 attempts left");
    let details = response.details.unwrap();
    assert_eq!(details["attempts_remaining"], 1);
}

#[test]
fn test_error_response_hides_infrastructure_detail() {
    let err = OtpError::Infrastructure {
        message: "redis://:secret@cache:6379 refused".to_string(),
    };
    let response = err.to_error_response();
    assert_eq!(response.error, "CACHE_ERROR");
    assert!(!response.message.contains("secret"));
    assert!(response.details.is_none());
}

#[test]
fn test_error_response_blocked_reason_detail() {
    let response = OtpError::IssuanceBlocked {
        reason: BlockReason::Cooldown,
    }
    .to_error_response();
    let details = response.details.unwrap();
    assert_eq!(details["reason"], "cooldown");
}
