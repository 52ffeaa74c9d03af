//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse (bind address, mail addresses)
//! - Validate value ranges (window > 0, caps > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use email_address::EmailAddress;

use crate::config::schema::AppConfig;

/// A single semantic problem found in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate semantic constraints on a parsed config.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a socket address: {}", config.listener.bind_address),
        });
    }

    if config.intake.max_attachment_mib == 0 {
        errors.push(ValidationError {
            field: "intake.max_attachment_mib",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.intake.allowed_extensions.is_empty() {
        errors.push(ValidationError {
            field: "intake.allowed_extensions",
            message: "at least one extension is required".to_string(),
        });
    }
    for ext in &config.intake.allowed_extensions {
        if ext.is_empty() || ext.starts_with('.') || *ext != ext.to_lowercase() {
            errors.push(ValidationError {
                field: "intake.allowed_extensions",
                message: format!("extensions must be lowercase without a dot: {ext:?}"),
            });
        }
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError {
            field: "rate_limit.window_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError {
            field: "rate_limit.max_requests",
            message: "must be greater than zero".to_string(),
        });
    }

    if !EmailAddress::is_valid(&config.mail.recipient) {
        errors.push(ValidationError {
            field: "mail.recipient",
            message: format!("not a valid address: {}", config.mail.recipient),
        });
    }
    if !EmailAddress::is_valid(&config.mail.from_address) {
        errors.push(ValidationError {
            field: "mail.from_address",
            message: format!("not a valid address: {}", config.mail.from_address),
        });
    }
    if config.mail.smtp.host.is_empty() {
        errors.push(ValidationError {
            field: "mail.smtp.host",
            message: "must not be empty".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!("not a socket address: {}", config.observability.metrics_address),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
