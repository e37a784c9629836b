//! Email delivery configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery provider
    #[serde(default = "default_provider")]
    pub provider: EmailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    #[serde(skip_serializing)]
    pub password: String,

    /// Sender address
    pub from_email: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Encrypt the connection: implicit TLS on port 465, STARTTLS otherwise
    #[serde(default)]
    pub use_tls: bool,

    /// Timeout for a single SMTP exchange in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory holding the `*.html` OTP templates
    #[serde(default = "default_template_dir")]
    pub template_dir: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            smtp_host: String::from("localhost"),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_email: String::from("no-reply@eshop.local"),
            from_name: default_from_name(),
            use_tls: true,
            timeout_secs: default_timeout_secs(),
            template_dir: default_template_dir(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let d = Self::default();
        let provider = std::env::var("EMAIL_PROVIDER")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(d.provider);
        let username = std::env::var("SMTP_USER").unwrap_or_default();
        let from_email = std::env::var("SMTP_FROM")
            .ok()
            .filter(|from| !from.is_empty())
            .unwrap_or_else(|| {
                if username.is_empty() {
                    d.from_email.clone()
                } else {
                    username.clone()
                }
            });

        Self {
            provider,
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(d.smtp_host),
            smtp_port: env_or("SMTP_PORT", d.smtp_port),
            username,
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email,
            from_name: std::env::var("SMTP_FROM_NAME").unwrap_or(d.from_name),
            use_tls: env_or("SMTP_USE_TLS", d.use_tls),
            timeout_secs: env_or("SMTP_TIMEOUT_SECS", d.timeout_secs),
            template_dir: std::env::var("EMAIL_TEMPLATE_DIR").unwrap_or(d.template_dir),
        }
    }

    /// Validate the configuration for the selected provider
    pub fn validate(&self) -> Result<(), String> {
        if self.provider == EmailProvider::Mock {
            return Ok(());
        }
        if self.smtp_host.is_empty() {
            return Err("SMTP host is required for the smtp provider".to_string());
        }
        if self.from_email.is_empty() {
            return Err("Sender address is required for the smtp provider".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("SMTP timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Email provider enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Smtp,
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

fn default_provider() -> EmailProvider {
    EmailProvider::Mock
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    String::from("EShop")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_template_dir() -> String {
    String::from("infra/templates")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mock() {
        let config = EmailConfig::default();
        assert_eq!(config.provider, EmailProvider::Mock);
        assert_eq!(config.smtp_port, 587);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_smtp_requires_host() {
        let config = EmailConfig {
            provider: EmailProvider::Smtp,
            smtp_host: String::new(),
            ..EmailConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_password_not_serialized() {
        let config = EmailConfig {
            password: "hunter2".to_string(),
            ..EmailConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
