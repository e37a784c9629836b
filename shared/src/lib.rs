//! Shared utilities and common types for EShop server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (OTP policy, cache, email, logging)
//! - Error response structures
//! - Log masking helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CacheType, EmailConfig, EmailProvider, Environment, LogFormat,
    LoggingConfig, OtpConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::masking;
