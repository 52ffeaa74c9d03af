//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → handler.rs (gate → sanitize → build → deliver)
//!     → response.rs (JSON envelope)
//!     → Send to client
//! ```

pub mod handler;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
