//! # EShop Core
//!
//! Core domain for the EShop OTP guard. The guard gates one-time-password
//! issuance and verification per identity (cooldown, spam lock, failure lock)
//! on top of an injected key-value store and an injected delivery channel.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
