//! JSON response envelope.
//!
//! Every reply has the same tiny shape: `{"ok": true}` on success,
//! `{"ok": false, "error": "..."}` on failure. No other payload is ever
//! returned to the caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success() -> Self {
        Self { ok: true, error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { ok: false, error: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializes_without_error_field() {
        let json = serde_json::to_string(&ApiResponse::success()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn test_failure_carries_the_message() {
        let json = serde_json::to_string(&ApiResponse::failure("nope")).unwrap();
        assert_eq!(json, r#"{"ok":false,"error":"nope"}"#);
    }
}
