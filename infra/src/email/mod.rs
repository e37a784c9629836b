//! Email module for OTP delivery
//!
//! Implementations of the `OtpDelivery` trait:
//! - SMTP through lettre, bodies rendered from Tera templates
//! - A mock that logs and records recent messages

pub mod mock;
#[cfg(feature = "smtp-email")]
pub mod smtp;
pub mod templates;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use es_core::errors::DeliveryError;
use es_core::services::otp::OtpDelivery;
use es_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub use mock::{MockEmailDelivery, SentEmail};
#[cfg(feature = "smtp-email")]
pub use smtp::SmtpEmailDelivery;
pub use templates::EmailTemplates;

/// Create the delivery channel selected by `config.provider`
///
/// An SMTP channel that cannot be set up is an error; the mock is only used
/// when it is the configured provider.
pub fn create_delivery(config: &EmailConfig) -> Result<Arc<dyn OtpDelivery>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::warn!("Using mock email delivery; no OTP emails will be sent");
            Ok(Arc::new(MockEmailDelivery::new()))
        }
        EmailProvider::Smtp => create_smtp(config).map_err(|e| {
            tracing::error!("Failed to initialize SMTP email delivery: {}", e);
            e
        }),
    }
}

#[cfg(feature = "smtp-email")]
fn create_smtp(config: &EmailConfig) -> Result<Arc<dyn OtpDelivery>, InfrastructureError> {
    let templates = EmailTemplates::load(&config.template_dir)?;
    Ok(Arc::new(SmtpEmailDelivery::new(config, templates)?))
}

#[cfg(not(feature = "smtp-email"))]
fn create_smtp(_config: &EmailConfig) -> Result<Arc<dyn OtpDelivery>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "SMTP delivery requires the `smtp-email` feature".to_string(),
    ))
}

impl From<InfrastructureError> for DeliveryError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Template(e) => DeliveryError::Template {
                message: e.to_string(),
            },
            other => DeliveryError::Transport {
                message: other.to_string(),
            },
        }
    }
}
