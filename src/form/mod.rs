//! Form intake subsystem.
//!
//! # Data Flow
//! ```text
//! request body (multipart/form-data or urlencoded)
//!     → parse.rs (raw fields + optional upload)
//!     → sanitize.rs (trim, CR/LF collapse, HTML escape)
//!     → submission.rs (honeypot, required fields, attachment rules)
//!     → Submission (immutable, per-request)
//! ```

pub mod parse;
pub mod sanitize;
pub mod submission;

pub use parse::{read_form, RawForm, RawUpload};
pub use submission::{Attachment, Submission};
