//! Mock email delivery
//!
//! Logs OTP emails instead of sending them and keeps a record of the most
//! recent messages, for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use es_core::domain::value_objects::{EmailTemplate, Identity};
use es_core::errors::DeliveryError;
use es_core::services::otp::{OtpDelivery, OtpMessage};

use super::templates::EmailTemplates;

/// Messages kept before the oldest is dropped
pub const MAX_RECORDED: usize = 256;

/// A message recorded by [`MockEmailDelivery`]
#[derive(Debug, Clone, Serialize)]
pub struct SentEmail {
    pub message_id: String,
    pub to: String,
    pub template: EmailTemplate,
    pub subject: String,
    pub message: OtpMessage,
    /// Rendered HTML, when the mock was given templates
    pub html_body: Option<String>,
    pub sent_at: DateTime<Utc>,
}

/// Mock delivery channel for development and testing
///
/// Clones share the same record, which holds at most [`MAX_RECORDED`]
/// messages.
#[derive(Clone, Default)]
pub struct MockEmailDelivery {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
    sent: Arc<Mutex<VecDeque<SentEmail>>>,
    templates: Option<Arc<EmailTemplates>>,
}

impl MockEmailDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every message with `templates` before recording it
    pub fn with_templates(mut self, templates: EmailTemplates) -> Self {
        self.templates = Some(Arc::new(templates));
        self
    }

    /// Total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Recorded messages, oldest first
    pub fn sent(&self) -> Vec<SentEmail> {
        self.records().iter().cloned().collect()
    }

    /// Code from the latest message to `identity`
    pub fn last_code(&self, identity: &str) -> Option<String> {
        self.records()
            .iter()
            .rev()
            .find(|email| email.to == identity)
            .map(|email| email.message.code.clone())
    }

    /// Latest code per recipient
    pub fn last_codes(&self) -> HashMap<String, String> {
        self.sent()
            .into_iter()
            .map(|email| (email.to, email.message.code))
            .collect()
    }

    /// The record survives a panic in another holder of the lock
    fn records(&self) -> MutexGuard<'_, VecDeque<SentEmail>> {
        self.sent.lock().unwrap_or_else(|poisoned| {
            warn!("Mock email record lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl OtpDelivery for MockEmailDelivery {
    async fn send(
        &self,
        identity: &Identity,
        template: EmailTemplate,
        message: &OtpMessage,
    ) -> Result<(), DeliveryError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(to = %identity, "Mock email service simulating failure");
            return Err(DeliveryError::Transport {
                message: "Simulated email sending failure".to_string(),
            });
        }

        let html_body = match &self.templates {
            Some(templates) => Some(templates.render(template, message)?),
            None => None,
        };

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "email_service",
            provider = "mock",
            to = %identity,
            template = %template,
            message_id = %message_id,
            count = count,
            event = "otp_email_sent",
            "Mock OTP email sent"
        );

        let record = SentEmail {
            message_id,
            to: identity.as_str().to_string(),
            template,
            subject: template.subject().to_string(),
            message: message.clone(),
            html_body,
            sent_at: Utc::now(),
        };
        {
            let mut sent = self.records();
            if sent.len() == MAX_RECORDED {
                sent.pop_front();
            }
            sent.push_back(record);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_survives_poisoned_lock() {
        let mock = MockEmailDelivery::new();
        let shared = mock.sent.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.lock().unwrap();
            panic!("poison the record");
        })
        .join();
        assert!(mock.sent.is_poisoned());

        let to = Identity::parse("frank@example.com").unwrap();
        mock.send(&to, EmailTemplate::UserActivation, &OtpMessage::new("Frank", "2468", 5))
            .await
            .unwrap();

        assert_eq!(mock.sent().len(), 1);
        assert_eq!(mock.last_code("frank@example.com"), Some("2468".to_string()));
    }

    #[tokio::test]
    async fn test_record_is_bounded() {
        let mock = MockEmailDelivery::new();
        let to = Identity::parse("gina@example.com").unwrap();

        for i in 0..MAX_RECORDED + 5 {
            let code = format!("{:04}", i);
            mock.send(&to, EmailTemplate::UserActivation, &OtpMessage::new("Gina", &code, 5))
                .await
                .unwrap();
        }

        let sent = mock.sent();
        assert_eq!(sent.len(), MAX_RECORDED);
        assert_eq!(sent[0].message.code, "0005");
        assert_eq!(mock.message_count(), (MAX_RECORDED + 5) as u64);
        assert_eq!(
            mock.last_code("gina@example.com"),
            Some(format!("{:04}", MAX_RECORDED + 4))
        );
    }
}
