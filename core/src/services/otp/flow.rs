//! Request and confirm steps as used by registration and password reset

use std::sync::Arc;

use crate::domain::entities::OtpStatus;
use crate::domain::value_objects::{EmailTemplate, Identity};
use crate::errors::OtpResult;

use super::config::OtpGuardConfig;
use super::guard::OtpGuard;
use super::traits::{KeyValueStore, OtpDelivery};

/// Two-step OTP flow over an [`OtpGuard`]
///
/// Every refusal comes back as an [`OtpError`](crate::errors::OtpError),
/// ready for a handler to render.
pub struct OtpFlow<S: KeyValueStore + ?Sized, D: OtpDelivery + ?Sized> {
    guard: OtpGuard<S, D>,
}

impl<S: KeyValueStore + ?Sized, D: OtpDelivery + ?Sized> OtpFlow<S, D> {
    pub fn new(store: Arc<S>, delivery: Arc<D>, config: OtpGuardConfig) -> Self {
        Self {
            guard: OtpGuard::new(store, delivery, config),
        }
    }

    pub fn from_guard(guard: OtpGuard<S, D>) -> Self {
        Self { guard }
    }

    pub fn guard(&self) -> &OtpGuard<S, D> {
        &self.guard
    }

    /// Gate, count and issue a code for `identity`
    pub async fn request_code(
        &self,
        identity: &str,
        display_name: &str,
        template: EmailTemplate,
    ) -> OtpResult<()> {
        let identity = Identity::parse(identity)?;

        self.guard
            .check_issuance_allowed(&identity)
            .await?
            .into_result()?;
        self.guard
            .record_issuance_request(&identity)
            .await?
            .into_result()?;
        self.guard.issue_code(&identity, template, display_name).await
    }

    /// Verify a submitted code
    pub async fn confirm_code(&self, identity: &str, code: &str) -> OtpResult<()> {
        let identity = Identity::parse(identity)?;
        self.guard.verify_code(&identity, code).await?.into_result()
    }

    pub async fn status(&self, identity: &str) -> OtpResult<OtpStatus> {
        let identity = Identity::parse(identity)?;
        self.guard.status(&identity).await
    }
}
