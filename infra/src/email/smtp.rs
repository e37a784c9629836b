//! SMTP delivery of OTP emails through lettre

use async_trait::async_trait;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;
use tracing::{debug, info};

use es_core::domain::value_objects::{EmailTemplate, Identity};
use es_core::errors::DeliveryError;
use es_core::services::otp::{OtpDelivery, OtpMessage};
use es_shared::EmailConfig;

use super::templates::EmailTemplates;
use crate::InfrastructureError;

/// Port for SMTP over implicit TLS
const SMTPS_PORT: u16 = 465;

/// Sends OTP emails over SMTP
///
/// lettre's SMTP transport is blocking, so each send runs on the blocking
/// thread pool. The transport timeout bounds every send.
pub struct SmtpEmailDelivery {
    transport: SmtpTransport,
    from: Mailbox,
    templates: EmailTemplates,
}

impl SmtpEmailDelivery {
    pub fn new(config: &EmailConfig, templates: EmailTemplates) -> Result<Self, InfrastructureError> {
        let transport = Self::build_transport(config)?;
        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            tls = config.use_tls,
            "SMTP email delivery configured"
        );

        Ok(Self {
            transport,
            from,
            templates,
        })
    }

    fn build_transport(config: &EmailConfig) -> Result<SmtpTransport, InfrastructureError> {
        let builder = if !config.use_tls {
            SmtpTransport::builder_dangerous(&config.smtp_host)
        } else if config.smtp_port == SMTPS_PORT {
            SmtpTransport::relay(&config.smtp_host)
                .map_err(|e| InfrastructureError::Email(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::starttls_relay(&config.smtp_host)
                .map_err(|e| InfrastructureError::Email(format!("Failed to create SMTP transport: {}", e)))?
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(builder.build())
    }

    pub(crate) fn build_message(
        &self,
        identity: &Identity,
        template: EmailTemplate,
        message: &OtpMessage,
    ) -> Result<Message, DeliveryError> {
        let to = identity
            .as_str()
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::Rejected {
                message: format!("Invalid recipient address: {}", e),
            })?;

        let html = self.templates.render(template, message)?;
        let text = format!(
            "Hello {},\n\nYour verification code is {}. It expires in {} minutes.\n",
            message.display_name, message.code, message.expires_in_minutes
        );

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(template.subject())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )
            .map_err(|e| DeliveryError::Rejected {
                message: format!("Failed to build message: {}", e),
            })
    }
}

#[async_trait]
impl OtpDelivery for SmtpEmailDelivery {
    async fn send(
        &self,
        identity: &Identity,
        template: EmailTemplate,
        message: &OtpMessage,
    ) -> Result<(), DeliveryError> {
        debug!(to = %identity, template = %template, "Sending OTP email");

        let email = self.build_message(identity, template, message)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| DeliveryError::Transport {
                message: format!("Task join error: {}", e),
            })?
            .map_err(|e| {
                if e.is_permanent() {
                    DeliveryError::Rejected {
                        message: e.to_string(),
                    }
                } else {
                    DeliveryError::Transport {
                        message: e.to_string(),
                    }
                }
            })?;

        info!(
            target: "email_service",
            provider = "smtp",
            to = %identity,
            template = %template,
            event = "otp_email_sent",
            "OTP email sent"
        );
        Ok(())
    }
}
