//! Unit tests for OTP value objects

use es_shared::OtpConfig;

use crate::domain::value_objects::{EmailTemplate, Identity, OtpCode, OtpKey, OtpKeyspace};
use crate::errors::OtpError;

#[test]
fn test_identity_rejects_empty() {
    assert!(matches!(Identity::parse(""), Err(OtpError::InvalidIdentity)));
}

#[test]
fn test_identity_is_opaque() {
    // No format validation beyond non-empty
    let identity = Identity::parse("not an email").unwrap();
    assert_eq!(identity.as_str(), "not an email");

    let padded = Identity::parse(" a@b.com ").unwrap();
    assert_eq!(padded.as_str(), " a@b.com ");
    assert_ne!(padded, Identity::parse("a@b.com").unwrap());
}

#[test]
fn test_identity_debug_is_masked() {
    let identity = Identity::parse("john@example.com").unwrap();
    let debug = format!("{:?}", identity);
    assert!(!debug.contains("john@"));
    assert!(debug.contains("example.com"));
}

#[test]
fn test_generated_code_has_configured_width() {
    for _ in 0..200 {
        let code = OtpCode::generate(4);
        assert_eq!(code.as_str().len(), 4);
        assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
        assert!(!code.as_str().starts_with('0'));
        let value: u32 = code.as_str().parse().unwrap();
        assert!((1000..=9999).contains(&value));
    }
}

#[test]
fn test_generated_code_width_is_clamped() {
    assert_eq!(OtpCode::generate(1).as_str().len(), OtpConfig::MIN_CODE_LENGTH as usize);
    assert_eq!(OtpCode::generate(20).as_str().len(), OtpConfig::MAX_CODE_LENGTH as usize);
    assert_eq!(OtpCode::generate(6).as_str().len(), 6);
}

#[test]
fn test_code_matches_exactly() {
    let code = OtpCode::from_stored("4821");
    assert!(code.matches("4821"));
    assert!(!code.matches("4822"));
    assert!(!code.matches("482"));
    assert!(!code.matches("04821"));
    assert!(!code.matches(" 4821"));
    assert!(!code.matches(""));
}

#[test]
fn test_code_debug_hides_value() {
    let code = OtpCode::from_stored("4821");
    assert!(!format!("{:?}", code).contains("4821"));
}

#[test]
fn test_key_format() {
    let keyspace = OtpKeyspace::default();
    let identity = Identity::parse("a@b.com").unwrap();

    assert_eq!(keyspace.key(OtpKey::Code, &identity), "otp:a@b.com");
    assert_eq!(keyspace.key(OtpKey::Cooldown, &identity), "otp_cooldown:a@b.com");
    assert_eq!(keyspace.key(OtpKey::Attempts, &identity), "otp_attempts:a@b.com");
    assert_eq!(keyspace.key(OtpKey::FailLock, &identity), "otp_fail_lock:a@b.com");
    assert_eq!(
        keyspace.key(OtpKey::RequestCount, &identity),
        "otp_request_count:a@b.com"
    );
    assert_eq!(keyspace.key(OtpKey::SpamLock, &identity), "otp_spam_lock:a@b.com");
}

#[test]
fn test_key_prefix() {
    let keyspace = OtpKeyspace::new(Some("eshop".to_string()));
    let identity = Identity::parse("a@b.com").unwrap();
    assert_eq!(keyspace.key(OtpKey::Code, &identity), "eshop:otp:a@b.com");

    // Empty prefix behaves as none
    let keyspace = OtpKeyspace::new(Some(String::new()));
    assert_eq!(keyspace.key(OtpKey::Code, &identity), "otp:a@b.com");
}

#[test]
fn test_keyspace_all_covers_every_entry() {
    let keyspace = OtpKeyspace::default();
    let identity = Identity::parse("a@b.com").unwrap();
    let keys = keyspace.all(&identity);
    assert_eq!(keys.len(), 6);
    assert!(keys.iter().all(|k| k.ends_with(":a@b.com")));
}

#[test]
fn test_key_ttls_follow_policy() {
    let policy = OtpConfig::default();
    assert_eq!(OtpKey::Code.ttl_secs(&policy), 300);
    assert_eq!(OtpKey::Cooldown.ttl_secs(&policy), 60);
    assert_eq!(OtpKey::Attempts.ttl_secs(&policy), 300);
    assert_eq!(OtpKey::FailLock.ttl_secs(&policy), 1800);
    assert_eq!(OtpKey::RequestCount.ttl_secs(&policy), 3600);
    assert_eq!(OtpKey::SpamLock.ttl_secs(&policy), 3600);
}

#[test]
fn test_email_template_names() {
    assert_eq!(EmailTemplate::UserActivation.name(), "user-activation-mail");
    assert_eq!(EmailTemplate::UserForgotPassword.name(), "user-forgot-password-mail");
    assert_eq!(EmailTemplate::SellerActivation.name(), "seller-activation-mail");
    assert_eq!(
        EmailTemplate::SellerForgotPassword.name(),
        "seller-forgot-password-mail"
    );
    assert!(EmailTemplate::ALL.iter().all(|t| t.subject() == "OTP Verification"));
}

#[test]
fn test_email_template_serde_uses_names() {
    let json = serde_json::to_string(&EmailTemplate::SellerActivation).unwrap();
    assert_eq!(json, "\"seller-activation\"");
    let parsed: EmailTemplate = serde_json::from_str("\"user-forgot-password\"").unwrap();
    assert_eq!(parsed, EmailTemplate::UserForgotPassword);
}
