//! Outbound mail subsystem.
//!
//! # Data Flow
//! ```text
//! Submission
//!     → builder.rs (subject line, labeled plain-text body, header set)
//!     → mime.rs (typed parts → multipart encoding when a file is attached)
//!     → OutboundMessage (immutable)
//!     → transport.rs (SMTP delivery behind the MailTransport trait)
//! ```
//!
//! # Design Decisions
//! - Message construction is pure; the only I/O lives in the transport
//! - Multipart serialization is isolated in one encoder that owns boundary
//!   correctness
//! - The transport receives fully formed bytes; it never edits the message

pub mod builder;
pub mod mime;
pub mod transport;

pub use builder::{build, OutboundMessage};
pub use transport::{MailTransport, SmtpMailTransport, TransportError};
