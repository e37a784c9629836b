//! Domain entities representing OTP state.

pub mod otp_status;

pub use otp_status::{EntryState, OtpStatus};
