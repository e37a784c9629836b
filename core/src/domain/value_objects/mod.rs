//! Value objects for the OTP workflow.

pub mod email_template;
pub mod identity;
pub mod otp_code;
pub mod otp_key;

#[cfg(test)]
mod tests;

pub use email_template::EmailTemplate;
pub use identity::Identity;
pub use otp_code::OtpCode;
pub use otp_key::{OtpKey, OtpKeyspace, LOCK_FLAG};
