//! Metrics collection and exposition.
//!
//! # Metrics
//! - `intake_submissions_total` (counter): submissions by outcome
//!   (`accepted` or the rejection kind)
//! - `intake_rate_limited_total` (counter): requests rejected by the limiter

use std::net::SocketAddr;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    if let Err(e) = builder.install() {
        tracing::error!(error = %e, "Failed to install Prometheus exporter");
        return;
    }

    describe_counter!("intake_submissions_total", "Form submissions by outcome");
    describe_counter!("intake_rate_limited_total", "Requests rejected by the rate limiter");

    tracing::info!(address = %addr, "Metrics exporter listening");
}

/// Count one finished submission attempt.
pub fn record_submission(outcome: &'static str) {
    counter!("intake_submissions_total", "outcome" => outcome).increment(1);
}

/// Count one rate-limited request.
pub fn record_rate_limited() {
    counter!("intake_rate_limited_total").increment(1);
}
