//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (windowed per-client counter, hashed keys)
//!     → form::sanitize (field cleaning happens in the form module)
//!     → Pass to message building
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in client input
//! - Raw client addresses never appear in store keys, only a stable hash

pub mod rate_limit;

pub use rate_limit::{InMemoryRateLimitStore, RateLimitStore, RateLimiter};
