//! OTP guard module
//!
//! Gates one-time-password issuance and verification per identity:
//! - One code per cooldown period
//! - A bounded number of requests per rolling window, then a spam lock
//! - A bounded number of wrong guesses per code, then a failure lock
//! - Full reset of an identity's state on successful verification

mod config;
mod flow;
mod guard;
mod traits;
mod types;


pub use config::OtpGuardConfig;
pub use flow::OtpFlow;
pub use guard::OtpGuard;
pub use traits::{KeyValueStore, OtpDelivery};
pub use types::{IssuanceDecision, OtpMessage, VerifyOutcome};
