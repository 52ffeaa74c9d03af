//! Configuration loading from disk.

use std::path::Path;
use std::fs;
use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from an optional path, falling back to validated defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = AppConfig::default();
            apply_env_overrides(&mut config);
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// SMTP credentials live in the environment, not in the file on disk.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(host) = std::env::var("SMTP_HOST") {
        config.mail.smtp.host = host;
    }
    if let Ok(port) = std::env::var("SMTP_PORT") {
        if let Ok(port) = port.parse() {
            config.mail.smtp.port = port;
        }
    }
    if let Ok(user) = std::env::var("SMTP_USER") {
        config.mail.smtp.username = Some(user);
    }
    if let Ok(password) = std::env::var("SMTP_PASSWORD") {
        config.mail.smtp.password = Some(password);
    }
}
