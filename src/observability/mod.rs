//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → structured log events (tracing, initialized in main)
//!     → metrics.rs (submission outcome counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Metrics are cheap (atomic increments) and labeled by outcome only;
//!   nothing client-identifying is ever recorded

pub mod metrics;
