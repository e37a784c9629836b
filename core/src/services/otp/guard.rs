//! OTP guard: issuance gating, code verification and lockouts

use std::sync::Arc;

use es_shared::OtpConfig;

use crate::domain::entities::{EntryState, OtpStatus};
use crate::domain::value_objects::{
    EmailTemplate, Identity, OtpCode, OtpKey, OtpKeyspace, LOCK_FLAG,
};
use crate::errors::{BlockReason, InvalidReason, OtpError, OtpResult, StoreError};

use super::config::OtpGuardConfig;
use super::traits::{KeyValueStore, OtpDelivery};
use super::types::{IssuanceDecision, OtpMessage, VerifyOutcome};

/// Sole owner of the OTP entries of every identity
///
/// Holds no state of its own; everything lives in the store, so one guard
/// can be shared across request handlers behind an `Arc`.
pub struct OtpGuard<S: KeyValueStore + ?Sized, D: OtpDelivery + ?Sized> {
    store: Arc<S>,
    delivery: Arc<D>,
    policy: OtpConfig,
    keyspace: OtpKeyspace,
}

impl<S: KeyValueStore + ?Sized, D: OtpDelivery + ?Sized> OtpGuard<S, D> {
    pub fn new(store: Arc<S>, delivery: Arc<D>, config: OtpGuardConfig) -> Self {
        Self {
            store,
            delivery,
            policy: config.policy,
            keyspace: OtpKeyspace::new(config.key_prefix),
        }
    }

    pub fn policy(&self) -> &OtpConfig {
        &self.policy
    }

    pub fn keyspace(&self) -> &OtpKeyspace {
        &self.keyspace
    }

    /// Decide whether a code may be issued right now
    ///
    /// Checks the failure lock, the spam lock and the cooldown, in that
    /// order, and reports the first one set. Read-only.
    pub async fn check_issuance_allowed(&self, identity: &Identity) -> OtpResult<IssuanceDecision> {
        let gates = [
            (OtpKey::FailLock, BlockReason::FailLocked),
            (OtpKey::SpamLock, BlockReason::SpamLocked),
            (OtpKey::Cooldown, BlockReason::Cooldown),
        ];

        for (kind, reason) in gates {
            if self.is_set(kind, identity).await? {
                tracing::debug!(
                    identity = %identity,
                    reason = %reason,
                    event = "otp_issuance_blocked",
                    "OTP issuance blocked"
                );
                return Ok(IssuanceDecision::Blocked(reason));
            }
        }

        Ok(IssuanceDecision::Allowed)
    }

    /// Count an issuance request against the rolling window
    ///
    /// Once the count passes the threshold the spam lock is set and the
    /// counter is dropped, so the window restarts when the lock expires.
    pub async fn record_issuance_request(&self, identity: &Identity) -> OtpResult<IssuanceDecision> {
        let counter_key = self.keyspace.key(OtpKey::RequestCount, identity);
        let count = self
            .store
            .incr(&counter_key, self.policy.request_window_secs)
            .await?;

        if count > i64::from(self.policy.max_requests_per_window) {
            self.set_flag(OtpKey::SpamLock, identity).await?;
            self.store.delete(&[counter_key]).await?;

            tracing::warn!(
                identity = %identity,
                requests = count,
                lock_secs = self.policy.spam_lock_secs,
                event = "otp_spam_locked",
                "Too many OTP requests, issuance locked"
            );
            return Ok(IssuanceDecision::Blocked(BlockReason::SpamLocked));
        }

        Ok(IssuanceDecision::Allowed)
    }

    /// Generate, deliver and store a fresh code
    ///
    /// Nothing is written unless delivery succeeds. The new code replaces
    /// any live one and starts with a clean attempt counter.
    pub async fn issue_code(
        &self,
        identity: &Identity,
        template: EmailTemplate,
        display_name: &str,
    ) -> OtpResult<()> {
        let code = OtpCode::generate(self.policy.code_length);
        let message = OtpMessage::new(display_name, code.as_str(), self.policy.code_ttl_minutes());

        if let Err(e) = self.delivery.send(identity, template, &message).await {
            tracing::error!(
                identity = %identity,
                template = %template,
                error = %e,
                event = "otp_delivery_failed",
                "Failed to deliver OTP"
            );
            return Err(e.into());
        }

        self.store
            .set_ex(
                &self.keyspace.key(OtpKey::Code, identity),
                code.as_str(),
                self.policy.code_ttl_secs,
            )
            .await?;
        self.set_flag(OtpKey::Cooldown, identity).await?;
        self.store
            .delete(&[self.keyspace.key(OtpKey::Attempts, identity)])
            .await?;

        tracing::info!(
            identity = %identity,
            template = %template,
            ttl_secs = self.policy.code_ttl_secs,
            event = "otp_issued",
            "OTP issued"
        );
        Ok(())
    }

    /// Check a submitted code against the live one
    pub async fn verify_code(&self, identity: &Identity, submitted: &str) -> OtpResult<VerifyOutcome> {
        if self.is_set(OtpKey::FailLock, identity).await? {
            tracing::debug!(
                identity = %identity,
                event = "otp_verification_blocked",
                "OTP verification attempted while locked"
            );
            return Ok(VerifyOutcome::Blocked(BlockReason::FailLocked));
        }

        let stored = match self
            .store
            .get(&self.keyspace.key(OtpKey::Code, identity))
            .await?
        {
            Some(value) => OtpCode::from_stored(value),
            None => {
                return Ok(VerifyOutcome::Invalid {
                    reason: InvalidReason::NoActiveCode,
                    attempts_remaining: None,
                })
            }
        };

        if stored.matches(submitted) {
            let removed = self.store.delete(&self.keyspace.all(identity)).await?;
            tracing::info!(
                identity = %identity,
                cleared = removed,
                event = "otp_verified",
                "OTP verified"
            );
            return Ok(VerifyOutcome::Verified);
        }

        let attempts_key = self.keyspace.key(OtpKey::Attempts, identity);
        let failures = self
            .store
            .incr(&attempts_key, self.policy.attempts_ttl_secs)
            .await?;
        let max = i64::from(self.policy.max_failed_attempts);

        if failures >= max {
            self.set_flag(OtpKey::FailLock, identity).await?;
            self.store
                .delete(&[self.keyspace.key(OtpKey::Code, identity), attempts_key])
                .await?;

            tracing::warn!(
                identity = %identity,
                failures = failures,
                lock_secs = self.policy.fail_lock_secs,
                event = "otp_fail_locked",
                "Too many failed OTP attempts, verification locked"
            );
            return Ok(VerifyOutcome::Blocked(BlockReason::FailLocked));
        }

        let attempts_remaining = u32::try_from(max - failures).unwrap_or(0);
        tracing::info!(
            identity = %identity,
            attempts_remaining = attempts_remaining,
            event = "otp_verification_failed",
            "Incorrect OTP submitted"
        );
        Ok(VerifyOutcome::Invalid {
            reason: InvalidReason::WrongCode,
            attempts_remaining: Some(attempts_remaining),
        })
    }

    /// Snapshot of every entry for `identity`, without the code itself
    pub async fn status(&self, identity: &Identity) -> OtpResult<OtpStatus> {
        let mut status = OtpStatus::default();

        for kind in OtpKey::ALL {
            let key = self.keyspace.key(kind, identity);
            let entry = match self.store.ttl(&key).await? {
                Some(ttl) => EntryState::present(ttl),
                None => EntryState::absent(),
            };

            match kind {
                OtpKey::Code => status.code = entry,
                OtpKey::Cooldown => status.cooldown = entry,
                OtpKey::Attempts => {
                    status.attempts = entry;
                    status.failed_attempts = self.read_counter(&key).await?;
                }
                OtpKey::FailLock => status.fail_lock = entry,
                OtpKey::RequestCount => {
                    status.request_count = entry;
                    status.requests_in_window = self.read_counter(&key).await?;
                }
                OtpKey::SpamLock => status.spam_lock = entry,
            }
        }

        Ok(status)
    }

    async fn is_set(&self, kind: OtpKey, identity: &Identity) -> OtpResult<bool> {
        let value = self.store.get(&self.keyspace.key(kind, identity)).await?;
        Ok(value.is_some())
    }

    async fn set_flag(&self, kind: OtpKey, identity: &Identity) -> OtpResult<()> {
        self.store
            .set_ex(
                &self.keyspace.key(kind, identity),
                LOCK_FLAG,
                kind.ttl_secs(&self.policy),
            )
            .await?;
        Ok(())
    }

    async fn read_counter(&self, key: &str) -> OtpResult<u32> {
        match self.store.get(key).await? {
            Some(value) => value.parse::<u32>().map_err(|_| {
                OtpError::from(StoreError::Corrupt {
                    key: key.to_string(),
                    value,
                })
            }),
            None => Ok(0),
        }
    }
}
