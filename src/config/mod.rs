//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, env overrides for SMTP secrets)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so a missing file still yields a runnable config
//! - Validation separates syntactic (serde) from semantic checks
//! - SMTP credentials come from the environment, never from the file on disk

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AppConfig;
pub use schema::IntakeConfig;
pub use schema::MailConfig;
pub use schema::RateLimitConfig;
