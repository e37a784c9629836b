//! Reasons and collaborator errors for the OTP workflow
//!
//! Collaborator errors are raised by store and delivery adapters and folded
//! into [`OtpError`](super::OtpError) at the guard boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an issuance or verification request was refused outright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// A code was issued less than a cooldown period ago
    Cooldown,
    /// Too many issuance requests in the current window
    SpamLocked,
    /// Too many wrong guesses against a code
    FailLocked,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BlockReason::Cooldown => "cooldown",
            BlockReason::SpamLocked => "spam_locked",
            BlockReason::FailLocked => "fail_locked",
        };
        f.write_str(s)
    }
}

/// Why a submitted code was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// No live code (never issued, expired, or already consumed)
    NoActiveCode,
    /// A code is live but the submission did not match
    WrongCode,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvalidReason::NoActiveCode => "no_active_code",
            InvalidReason::WrongCode => "wrong_code",
        };
        f.write_str(s)
    }
}

/// Key-value store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store connection error: {message}")]
    Connection { message: String },

    #[error("Store command error: {message}")]
    Command { message: String },

    #[error("Corrupt value at {key}: {value}")]
    Corrupt { key: String, value: String },
}

/// Delivery channel failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Message rejected: {message}")]
    Rejected { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Template error: {message}")]
    Template { message: String },
}
