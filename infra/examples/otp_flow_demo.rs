//! OTP flow demo
//!
//! Walks through issuance, cooldown, wrong guesses, lockout and a successful
//! verification using the in-memory store and the mock mailer.
//!
//! Run with: cargo run -p es_infra --example otp_flow_demo

use std::sync::Arc;

use es_core::domain::value_objects::EmailTemplate;
use es_core::services::otp::{OtpFlow, OtpGuardConfig};
use es_infra::cache::MemoryKeyValueStore;
use es_infra::email::{EmailTemplates, MockEmailDelivery};
use es_infra::telemetry::init_tracing;
use es_shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::development();
    init_tracing(&config.logging)?;

    let store = Arc::new(MemoryKeyValueStore::new());
    let delivery = Arc::new(MockEmailDelivery::new().with_templates(EmailTemplates::builtin()?));
    let flow = OtpFlow::new(
        store,
        delivery.clone(),
        OtpGuardConfig::from_configs(&config.otp, &config.cache),
    );

    let alice = "alice@example.com";
    println!("== Registration for {}", alice);
    flow.request_code(alice, "Alice", EmailTemplate::UserActivation).await?;
    println!("Code sent ({} message(s) so far)", delivery.message_count());

    match flow.request_code(alice, "Alice", EmailTemplate::UserActivation).await {
        Ok(()) => println!("Second request unexpectedly allowed"),
        Err(e) => println!("Second request refused: {} [{}]", e, e.error_code()),
    }

    let code = delivery.last_code(alice).ok_or("no code delivered")?;
    flow.confirm_code(alice, &code).await?;
    println!("Verified; state cleared: {}", flow.status(alice).await?.is_clear());

    let bob = "bob@example.com";
    println!("\n== Password reset for {}", bob);
    flow.request_code(bob, "Bob", EmailTemplate::UserForgotPassword).await?;
    for guess in ["0000", "0001", "0002"] {
        match flow.confirm_code(bob, guess).await {
            Ok(()) => println!("Guess {} accepted", guess),
            Err(e) => println!("Guess {} refused: {}", guess, e),
        }
    }

    let status = flow.status(bob).await?;
    println!(
        "Active code: {}, fail lock expires in {:?}s",
        status.has_active_code(),
        status.fail_lock.ttl_secs
    );

    Ok(())
}
