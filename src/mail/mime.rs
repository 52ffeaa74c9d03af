//! Multipart MIME encoding.
//!
//! The one place prone to subtle formatting bugs, so it is kept structural:
//! an ordered list of typed parts serialized by a single encoder that owns
//! boundary placement, base64 line wrapping, and the terminating line.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;

/// RFC 2045 transport convention for base64 bodies.
const BASE64_LINE_WIDTH: usize = 76;

/// One body part, in the order it will be serialized.
#[derive(Debug)]
pub enum MimePart {
    Text {
        content: String,
    },
    Attachment {
        mime_type: String,
        filename: String,
        bytes: Vec<u8>,
    },
}

/// An ordered multipart body with its boundary token.
#[derive(Debug)]
pub struct MultipartBody {
    boundary: String,
    parts: Vec<MimePart>,
}

impl MultipartBody {
    /// Build a body with a fresh random boundary.
    pub fn new(parts: Vec<MimePart>) -> Self {
        Self {
            boundary: generate_boundary(),
            parts,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Serialize all parts between boundary lines, terminated per RFC 2046
    /// with a trailing `--`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match part {
                MimePart::Text { content } => {
                    out.extend_from_slice(b"Content-Type: text/plain; charset=UTF-8\r\n\r\n");
                    out.extend_from_slice(content.as_bytes());
                    out.extend_from_slice(b"\r\n");
                }
                MimePart::Attachment { mime_type, filename, bytes } => {
                    out.extend_from_slice(
                        format!("Content-Type: {mime_type}; name=\"{filename}\"\r\n").as_bytes(),
                    );
                    out.extend_from_slice(b"Content-Transfer-Encoding: base64\r\n");
                    out.extend_from_slice(
                        format!("Content-Disposition: attachment; filename=\"{filename}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    out.extend_from_slice(base64_wrapped(bytes).as_bytes());
                    out.extend_from_slice(b"\r\n");
                }
            }
        }
        out.extend_from_slice(format!("--{}--", self.boundary).as_bytes());
        out
    }
}

/// Random, collision-resistant boundary token, one per message.
fn generate_boundary() -> String {
    format!("intake-{}", Uuid::new_v4().simple())
}

/// Base64 with CRLF line breaks every 76 characters, including after the
/// final chunk.
fn base64_wrapped(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_WIDTH * 2 + 2);
    let raw = encoded.as_bytes();
    for chunk in raw.chunks(BASE64_LINE_WIDTH) {
        out.push_str(std::str::from_utf8(chunk).expect("base64 output is ASCII"));
        out.push_str("\r\n");
    }
    out
}
