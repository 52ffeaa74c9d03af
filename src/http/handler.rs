//! Submission request handler.
//!
//! The four pipeline stages run strictly forward: request gate, input
//! sanitizer, message builder, delivery adapter. Any failure is terminal for
//! the request and maps straight to a JSON error response.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::net::SocketAddr;

use crate::error::SubmitError;
use crate::form::{self, Submission};
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::mail;
use crate::observability::metrics;

/// Entry point for the intake endpoint. Routed with `any()` so the method
/// gate stays in the pipeline instead of in the router.
pub async fn submit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    match handle_submission(&state, addr, request).await {
        Ok(()) => {
            metrics::record_submission("accepted");
            (StatusCode::OK, Json(ApiResponse::success())).into_response()
        }
        Err(error) => {
            tracing::warn!(client = %addr.ip(), kind = error.kind(), "submission rejected");
            metrics::record_submission(error.kind());
            if matches!(error, SubmitError::RateLimited) {
                metrics::record_rate_limited();
            }
            error.into_response()
        }
    }
}

async fn handle_submission(
    state: &AppState,
    addr: SocketAddr,
    request: Request<Body>,
) -> Result<(), SubmitError> {
    // 1. Request gate. The method check runs first and must not count
    //    against the rate limit.
    if request.method() != Method::POST {
        return Err(SubmitError::MethodNotAllowed);
    }
    state.limiter.check(addr.ip())?;

    // 2. Input sanitizer.
    let raw = form::read_form(request).await?;
    let submission = Submission::from_form(
        raw,
        &state.config.intake,
        &state.config.mail.default_subject,
    )?;

    // 3. Message builder. Pure construction, no I/O.
    let message = mail::build(&submission, &state.config.mail);

    tracing::debug!(
        subject = %message.subject,
        attachment = submission.attachment.is_some(),
        "submission accepted, relaying"
    );

    // 4. Delivery adapter. Transport details are logged, never surfaced.
    state.transport.deliver(&message).await.map_err(|e| {
        tracing::error!(error = %e, "mail delivery failed");
        SubmitError::DeliveryFailed
    })?;

    Ok(())
}

/// Liveness probe.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
