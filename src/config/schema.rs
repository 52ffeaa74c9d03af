//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the intake relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Form and attachment acceptance rules.
    pub intake: IntakeConfig,

    /// Per-client rate limiting.
    pub rate_limit: RateLimitConfig,

    /// Outbound mail settings.
    pub mail: MailConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Acceptance rules for the submission form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Maximum attachment size in MiB.
    pub max_attachment_mib: u64,

    /// Allowed attachment extensions (lowercase, without the dot).
    pub allowed_extensions: Vec<String>,
}

impl IntakeConfig {
    /// Attachment size cap in bytes.
    pub fn max_attachment_bytes(&self) -> usize {
        (self.max_attachment_mib as usize) * 1024 * 1024
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_attachment_mib: 5,
            allowed_extensions: vec!["pdf".to_string(), "doc".to_string(), "docx".to_string()],
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    pub window_secs: u64,

    /// Maximum submissions per client within one window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 300,
            max_requests: 5,
        }
    }
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    /// Fixed recipient of every submission.
    pub recipient: String,

    /// Display name on the From header.
    pub from_name: String,

    /// Fixed sender address (never the applicant's).
    pub from_address: String,

    /// Prefix prepended to every subject line.
    pub subject_prefix: String,

    /// Subject used when the form omits the field entirely.
    pub default_subject: String,

    /// SMTP relay settings.
    pub smtp: SmtpConfig,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            recipient: "info@hrsolutions.com.ar".to_string(),
            from_name: "HR Solutions & Talent".to_string(),
            from_address: "webform@hrsolutions.com.ar".to_string(),
            subject_prefix: "[Postulación] ".to_string(),
            default_subject: "Postulación".to_string(),
            smtp: SmtpConfig::default(),
        }
    }
}

/// SMTP relay connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// Relay hostname.
    pub host: String,

    /// Relay port.
    pub port: u16,

    /// Username; overridden by `SMTP_USER` when set.
    pub username: Option<String>,

    /// Password; overridden by `SMTP_PASSWORD` when set.
    pub password: Option<String>,

    /// Connection security: "starttls", "tls", or "none".
    pub tls: TlsMode,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: None,
            password: None,
            tls: TlsMode::Starttls,
        }
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    #[default]
    Starttls,
    Tls,
    None,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_upstream_policy() {
        let config = AppConfig::default();
        assert_eq!(config.intake.max_attachment_mib, 5);
        assert_eq!(config.intake.allowed_extensions, ["pdf", "doc", "docx"]);
        assert_eq!(config.rate_limit.window_secs, 300);
        assert_eq!(config.rate_limit.max_requests, 5);
    }

    #[test]
    fn test_minimal_toml_deserializes() {
        let config: AppConfig = toml::from_str(
            r#"
            [mail]
            recipient = "jobs@example.com"

            [mail.smtp]
            host = "smtp.example.com"
            tls = "tls"
            "#,
        )
        .unwrap();
        assert_eq!(config.mail.recipient, "jobs@example.com");
        assert_eq!(config.mail.smtp.host, "smtp.example.com");
        assert_eq!(config.mail.smtp.tls, TlsMode::Tls);
        // untouched sections fall back to defaults
        assert_eq!(config.rate_limit.max_requests, 5);
    }

    #[test]
    fn test_attachment_cap_in_bytes() {
        let intake = IntakeConfig::default();
        assert_eq!(intake.max_attachment_bytes(), 5 * 1024 * 1024);
    }
}
