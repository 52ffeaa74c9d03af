//! Job-application intake relay library.

pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod mail;
pub mod observability;
pub mod security;

pub use config::schema::AppConfig;
pub use error::SubmitError;
pub use http::HttpServer;
