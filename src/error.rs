//! Request-terminal error kinds and their HTTP mapping.
//!
//! Every failure in the submission pipeline ends the request; nothing is
//! retried internally. Each kind maps to a status code and a short generic
//! message. Transport and parse internals are logged, never surfaced.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

use crate::http::response::ApiResponse;

/// Terminal errors for a submission request.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("too many requests, try again later")]
    RateLimited,

    /// Honeypot tripped. The public message is identical to a validation
    /// failure so the response does not reveal which check rejected the bot.
    #[error("invalid name or email")]
    BotDetected,

    #[error("invalid name or email")]
    ValidationFailed,

    #[error("file exceeds the {0} MiB limit")]
    FileTooLarge(u64),

    #[error("file format not allowed (PDF, DOC, DOCX)")]
    FormatNotAllowed,

    #[error("invalid attachment")]
    AttachmentUnreadable,

    #[error("the message could not be sent")]
    DeliveryFailed,
}

impl SubmitError {
    pub fn status(&self) -> StatusCode {
        match self {
            SubmitError::MethodNotAllowed
            | SubmitError::BotDetected
            | SubmitError::ValidationFailed
            | SubmitError::FileTooLarge(_)
            | SubmitError::FormatNotAllowed
            | SubmitError::AttachmentUnreadable => StatusCode::BAD_REQUEST,
            SubmitError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            SubmitError::DeliveryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::MethodNotAllowed => "method_not_allowed",
            SubmitError::RateLimited => "rate_limited",
            SubmitError::BotDetected => "bot_detected",
            SubmitError::ValidationFailed => "validation_failed",
            SubmitError::FileTooLarge(_) => "file_too_large",
            SubmitError::FormatNotAllowed => "format_not_allowed",
            SubmitError::AttachmentUnreadable => "attachment_unreadable",
            SubmitError::DeliveryFailed => "delivery_failed",
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::failure(self.to_string()));
        (self.status(), body).into_response()
    }
}
