//! Email template rendering with Tera

use std::collections::HashMap;
use tera::{Context, Tera};
use tracing::{debug, warn};

use es_core::domain::value_objects::EmailTemplate;
use es_core::services::otp::OtpMessage;

use crate::InfrastructureError;

/// Templates shipped with the crate, used when no directory is configured
const BUILTIN_TEMPLATES: [(&str, &str); 4] = [
    (
        "user-activation-mail.html",
        include_str!("../../templates/user-activation-mail.html"),
    ),
    (
        "user-forgot-password-mail.html",
        include_str!("../../templates/user-forgot-password-mail.html"),
    ),
    (
        "seller-activation-mail.html",
        include_str!("../../templates/seller-activation-mail.html"),
    ),
    (
        "seller-forgot-password-mail.html",
        include_str!("../../templates/seller-forgot-password-mail.html"),
    ),
];

/// Renders OTP emails
///
/// Templates are looked up as `<template-name>.html` and receive the
/// serialized [`OtpMessage`] (`name`, `otp`, `expires_in_minutes`).
pub struct EmailTemplates {
    tera: Tera,
}

impl EmailTemplates {
    /// Load every `*.html` file under `template_dir`
    ///
    /// Fails if any of the OTP templates is missing.
    pub fn from_dir(template_dir: &str) -> Result<Self, InfrastructureError> {
        let pattern = format!("{}/**/*.html", template_dir);
        let tera = Tera::new(&pattern)?;
        let templates = Self { tera };
        templates.ensure_complete()?;

        debug!(template_dir = %template_dir, "Email templates loaded");
        Ok(templates)
    }

    /// Templates compiled into the binary
    pub fn builtin() -> Result<Self, InfrastructureError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    /// Load from `template_dir`, falling back to the built-in set
    pub fn load(template_dir: &str) -> Result<Self, InfrastructureError> {
        match Self::from_dir(template_dir) {
            Ok(templates) => Ok(templates),
            Err(e) => {
                warn!(
                    template_dir = %template_dir,
                    error = %e,
                    "Failed to load email templates, using built-in templates"
                );
                Self::builtin()
            }
        }
    }

    /// Build from in-memory strings keyed by file name
    pub fn from_strings(templates: HashMap<String, String>) -> Result<Self, InfrastructureError> {
        let mut tera = Tera::default();
        for (name, content) in templates {
            tera.add_raw_template(&name, &content)?;
        }
        Ok(Self { tera })
    }

    /// Template file name for `template`
    pub fn file_name(template: EmailTemplate) -> String {
        format!("{}.html", template.name())
    }

    /// Render the HTML body for `template`
    pub fn render(&self, template: EmailTemplate, message: &OtpMessage) -> Result<String, InfrastructureError> {
        let context = Context::from_serialize(message)?;
        Ok(self.tera.render(&Self::file_name(template), &context)?)
    }

    fn ensure_complete(&self) -> Result<(), InfrastructureError> {
        let loaded: Vec<&str> = self.tera.get_template_names().collect();
        let missing: Vec<String> = EmailTemplate::ALL
            .iter()
            .map(|template| Self::file_name(*template))
            .filter(|name| !loaded.contains(&name.as_str()))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(InfrastructureError::Config(format!(
                "Missing email templates: {}",
                missing.join(", ")
            )))
        }
    }
}
