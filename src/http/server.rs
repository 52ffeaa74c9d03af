//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the intake and health handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener and serve with graceful shutdown
//! - Periodically purge expired rate-limit records

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handler;
use crate::mail::MailTransport;
use crate::security::RateLimiter;

/// Headroom on top of the attachment cap for the other form fields and the
/// multipart framing.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Outer body cap. Uploads between the attachment cap and this bound reach
/// the explicit size check and get the specific "file too large" answer;
/// anything bigger is cut off while streaming.
fn request_body_limit(attachment_cap: usize) -> usize {
    attachment_cap * 2 + FORM_OVERHEAD_BYTES
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub limiter: Arc<RateLimiter>,
    pub transport: Arc<dyn MailTransport>,
}

/// HTTP server for the intake relay.
pub struct HttpServer {
    router: Router,
    limiter: Arc<RateLimiter>,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and transport.
    pub fn new(config: AppConfig, transport: Arc<dyn MailTransport>) -> Self {
        let limiter = Arc::new(RateLimiter::in_memory(&config.rate_limit));

        let state = AppState {
            config: Arc::new(config.clone()),
            limiter: limiter.clone(),
            transport,
        };

        let router = Self::build_router(&config, state);
        Self { router, limiter, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let body_limit = request_body_limit(config.intake.max_attachment_bytes());

        Router::new()
            .route("/submit", any(handler::submit))
            .route("/health", get(handler::health))
            .with_state(state)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Expired records are ignored on read anyway; the sweep only keeps
        // the store from accumulating dead entries.
        let limiter = self.limiter.clone();
        let sweep_every = limiter.window();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                limiter.purge_expired();
            }
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Take the assembled router; used by tests to drive the service
    /// without binding a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
