//! Delivery templates used when issuing a code.

use serde::{Deserialize, Serialize};

/// Which message accompanies an issued code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailTemplate {
    /// Buyer account activation
    UserActivation,
    /// Buyer password reset
    UserForgotPassword,
    /// Seller account activation
    SellerActivation,
    /// Seller password reset
    SellerForgotPassword,
}

impl EmailTemplate {
    pub const ALL: [EmailTemplate; 4] = [
        EmailTemplate::UserActivation,
        EmailTemplate::UserForgotPassword,
        EmailTemplate::SellerActivation,
        EmailTemplate::SellerForgotPassword,
    ];

    /// Template name understood by the delivery channel
    pub fn name(self) -> &'static str {
        match self {
            EmailTemplate::UserActivation => "user-activation-mail",
            EmailTemplate::UserForgotPassword => "user-forgot-password-mail",
            EmailTemplate::SellerActivation => "seller-activation-mail",
            EmailTemplate::SellerForgotPassword => "seller-forgot-password-mail",
        }
    }

    pub fn subject(self) -> &'static str {
        "OTP Verification"
    }
}

impl std::fmt::Display for EmailTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
