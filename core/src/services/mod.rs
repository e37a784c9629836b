//! Business services containing domain logic and use cases.

pub mod otp;

pub use otp::{
    IssuanceDecision, KeyValueStore, OtpDelivery, OtpFlow, OtpGuard, OtpGuardConfig, OtpMessage,
    VerifyOutcome,
};
