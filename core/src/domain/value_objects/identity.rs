//! Identity under which all OTP state is namespaced.

use std::fmt;

use es_shared::masking::mask_email;

use crate::errors::OtpError;

/// Opaque lookup key for OTP state, usually an email address
///
/// The only rule is that it is non-empty; its structure is the caller's
/// business.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Parse an identity, rejecting empty strings
    pub fn parse(raw: &str) -> Result<Self, OtpError> {
        if raw.is_empty() {
            return Err(OtpError::InvalidIdentity);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for log fields
    pub fn masked(&self) -> String {
        mask_email(&self.0)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&self.masked()).finish()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
