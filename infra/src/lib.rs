//! # Infrastructure Layer
//!
//! Concrete adapters for the OTP guard in `es_core`:
//! - **Cache**: Redis-backed and in-memory key-value stores
//! - **Email**: SMTP delivery with Tera templates, and a logging mock
//! - **Telemetry**: tracing subscriber setup
//!
//! ## Features
//!
//! - `redis-cache`: Redis key-value store (default)
//! - `smtp-email`: SMTP delivery through lettre (default)

use std::sync::Arc;

use es_core::services::otp::{KeyValueStore, OtpDelivery, OtpFlow, OtpGuard, OtpGuardConfig};
use es_shared::AppConfig;

// Re-export core types for convenience
pub use es_core::errors::*;

/// Cache module - key-value store implementations
pub mod cache;

/// Email module - OTP delivery implementations
pub mod email;

/// Telemetry module - tracing subscriber setup
pub mod telemetry;

/// Guard over the configured store and delivery channel
pub type DynOtpGuard = OtpGuard<dyn KeyValueStore, dyn OtpDelivery>;

/// Flow over the configured store and delivery channel
pub type DynOtpFlow = OtpFlow<dyn KeyValueStore, dyn OtpDelivery>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    delivery: Arc<dyn OtpDelivery>,
}

impl InfrastructureServices {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        delivery: Arc<dyn OtpDelivery>,
    ) -> Self {
        Self {
            config,
            store,
            delivery,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn delivery(&self) -> Arc<dyn OtpDelivery> {
        self.delivery.clone()
    }

    fn guard_config(&self) -> OtpGuardConfig {
        OtpGuardConfig::from_configs(&self.config.otp, &self.config.cache)
    }

    /// OTP guard wired to the configured backends
    pub fn otp_guard(&self) -> DynOtpGuard {
        OtpGuard::new(self.store.clone(), self.delivery.clone(), self.guard_config())
    }

    /// Request / confirm flow wired to the configured backends
    pub fn otp_flow(&self) -> DynOtpFlow {
        OtpFlow::new(self.store.clone(), self.delivery.clone(), self.guard_config())
    }
}

/// Initialize infrastructure services from the environment
///
/// This function:
/// - Loads `.env` if present
/// - Builds and validates the application configuration
/// - Connects the configured key-value store
/// - Sets up the configured delivery channel, failing if it cannot
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    dotenvy::dotenv().ok();
    initialize_with(AppConfig::from_env()).await
}

/// Initialize infrastructure services from an explicit configuration
pub async fn initialize_with(config: AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(
        environment = %config.environment,
        cache = ?config.cache.cache_type,
        email = ?config.email.provider,
        "Initializing infrastructure services..."
    );

    config.validate().map_err(InfrastructureError::Config)?;

    let store = cache::create_store(&config.cache).await?;
    let delivery = email::create_delivery(&config.email)?;

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices::new(config, store, delivery))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Template loading or rendering error
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email service error: {0}")]
    Email(String),

    /// Telemetry setup error
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
