//! Tests for email template rendering and SMTP message building

use std::collections::HashMap;

use es_core::domain::value_objects::{EmailTemplate, Identity};
use es_core::errors::DeliveryError;
use es_core::services::otp::OtpMessage;

use crate::email::EmailTemplates;
use crate::InfrastructureError;

fn message() -> OtpMessage {
    OtpMessage::new("Alice", "4821", 5)
}

#[test]
fn test_builtin_templates_render_all() {
    let templates = EmailTemplates::builtin().unwrap();

    for template in EmailTemplate::ALL {
        let html = templates.render(template, &message()).unwrap();
        assert!(html.contains("Hello Alice"));
        assert!(html.contains("4821"));
        assert!(html.contains("5 minutes"));
    }
}

#[test]
fn test_templates_from_crate_directory() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
    let templates = EmailTemplates::from_dir(dir).unwrap();

    let html = templates
        .render(EmailTemplate::SellerForgotPassword, &message())
        .unwrap();
    assert!(html.contains("seller password"));
}

#[test]
fn test_missing_directory_is_incomplete() {
    let result = EmailTemplates::from_dir("/nonexistent/eshop-templates");
    assert!(result.is_err());

    // load() falls back to the built-in set
    let templates = EmailTemplates::load("/nonexistent/eshop-templates").unwrap();
    assert!(templates.render(EmailTemplate::UserActivation, &message()).is_ok());
}

#[test]
fn test_from_strings_and_escaping() {
    let mut raw = HashMap::new();
    raw.insert(
        "user-activation-mail.html".to_string(),
        "<p>{{ name }}: {{ otp }}</p>".to_string(),
    );
    let templates = EmailTemplates::from_strings(raw).unwrap();

    let html = templates
        .render(
            EmailTemplate::UserActivation,
            &OtpMessage::new("<b>Eve</b>", "1234", 5),
        )
        .unwrap();
    assert!(html.starts_with("<p>&lt;b&gt;Eve"));
    assert!(html.ends_with(": 1234</p>"));

    let missing = templates.render(EmailTemplate::SellerActivation, &message());
    assert!(matches!(missing, Err(InfrastructureError::Template(_))));
}

#[test]
fn test_template_error_maps_to_delivery_error() {
    let templates = EmailTemplates::from_strings(HashMap::new()).unwrap();
    let err = templates
        .render(EmailTemplate::UserActivation, &message())
        .unwrap_err();

    let mapped: DeliveryError = err.into();
    assert!(matches!(mapped, DeliveryError::Template { .. }));
}

#[cfg(feature = "smtp-email")]
#[test]
fn test_smtp_message_building() {
    use crate::email::SmtpEmailDelivery;
    use es_shared::{EmailConfig, EmailProvider};

    let config = EmailConfig {
        provider: EmailProvider::Smtp,
        smtp_host: "smtp.example.com".to_string(),
        username: "user@example.com".to_string(),
        password: "password".to_string(),
        from_email: "noreply@example.com".to_string(),
        ..EmailConfig::default()
    };
    let delivery = SmtpEmailDelivery::new(&config, EmailTemplates::builtin().unwrap()).unwrap();

    let to = Identity::parse("alice@example.com").unwrap();
    let built = delivery.build_message(&to, EmailTemplate::UserActivation, &message());
    assert!(built.is_ok());

    let not_an_address = Identity::parse("not an address").unwrap();
    let rejected = delivery.build_message(&not_an_address, EmailTemplate::UserActivation, &message());
    assert!(matches!(rejected, Err(DeliveryError::Rejected { .. })));
}
