//! End-to-end OTP flow over the in-memory store and mock email delivery

use std::sync::Arc;
use std::time::Duration;

use es_core::domain::value_objects::EmailTemplate;
use es_core::errors::{BlockReason, InvalidReason, OtpError};
use es_core::services::otp::{KeyValueStore, OtpDelivery};
use es_infra::cache::MemoryKeyValueStore;
use es_infra::email::{EmailTemplates, MockEmailDelivery};
use es_infra::{initialize_with, InfrastructureError, InfrastructureServices};
use es_shared::{AppConfig, EmailProvider, ErrorResponse};

fn services() -> (MemoryKeyValueStore, MockEmailDelivery, InfrastructureServices) {
    let store = MemoryKeyValueStore::new();
    let delivery = MockEmailDelivery::new().with_templates(EmailTemplates::builtin().unwrap());
    let services = InfrastructureServices::new(
        AppConfig::development(),
        Arc::new(store.clone()) as Arc<dyn KeyValueStore>,
        Arc::new(delivery.clone()) as Arc<dyn OtpDelivery>,
    );
    (store, delivery, services)
}

#[tokio::test]
async fn test_registration_flow() {
    let (store, delivery, services) = services();
    let flow = services.otp_flow();

    flow.request_code("buyer@example.com", "Buyer", EmailTemplate::UserActivation)
        .await
        .unwrap();

    let sent = delivery.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].html_body.as_ref().unwrap().contains("Buyer"));

    let code = delivery.last_code("buyer@example.com").unwrap();
    flow.confirm_code("buyer@example.com", &code).await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_forgot_password_lockout_and_recovery() {
    let (_, delivery, services) = services();
    let flow = services.otp_flow();
    let identity = "seller@example.com";

    flow.request_code(identity, "Seller", EmailTemplate::SellerForgotPassword)
        .await
        .unwrap();

    let first = flow.confirm_code(identity, "0000").await.unwrap_err();
    let response: ErrorResponse = first.into();
    assert_eq!(response.error, "OTP_INVALID");
    assert_eq!(response.message, "Incorrect OTP. 2 attempts left");

    let second = flow.confirm_code(identity, "0000").await.unwrap_err();
    assert_eq!(
        second,
        OtpError::VerificationInvalid {
            reason: InvalidReason::WrongCode,
            attempts_remaining: Some(1),
        }
    );

    let third = flow.confirm_code(identity, "0000").await.unwrap_err();
    assert_eq!(third.block_reason(), Some(BlockReason::FailLocked));

    // The old code is gone and new requests are refused while locked
    let code = delivery.last_code(identity).unwrap();
    let err = flow.confirm_code(identity, &code).await.unwrap_err();
    assert_eq!(err.block_reason(), Some(BlockReason::FailLocked));
    let err = flow
        .request_code(identity, "Seller", EmailTemplate::SellerForgotPassword)
        .await
        .unwrap_err();
    assert_eq!(err.block_reason(), Some(BlockReason::FailLocked));

    tokio::time::advance(Duration::from_secs(1801)).await;

    flow.request_code(identity, "Seller", EmailTemplate::SellerForgotPassword)
        .await
        .unwrap();
    let code = delivery.last_code(identity).unwrap();
    flow.confirm_code(identity, &code).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_request_spam_lock_expires() {
    let (_, _, services) = services();
    let flow = services.otp_flow();
    let identity = "spammer@example.com";

    for _ in 0..3 {
        flow.request_code(identity, "Spam", EmailTemplate::UserActivation)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
    }
    let err = flow
        .request_code(identity, "Spam", EmailTemplate::UserActivation)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "OTP_SPAM_LOCKED");

    tokio::time::advance(Duration::from_secs(3601)).await;
    flow.request_code(identity, "Spam", EmailTemplate::UserActivation)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_initialize_with_development_config() {
    let services = initialize_with(AppConfig::development()).await.unwrap();
    let guard = services.otp_guard();

    let identity = es_core::domain::value_objects::Identity::parse("dev@example.com").unwrap();
    assert!(guard
        .check_issuance_allowed(&identity)
        .await
        .unwrap()
        .is_allowed());
}

#[tokio::test]
async fn test_initialize_with_broken_smtp_config_fails() {
    let mut config = AppConfig::development();
    config.email.provider = EmailProvider::Smtp;
    config.email.from_email = "not an address".to_string();

    let result = initialize_with(config).await;
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}
