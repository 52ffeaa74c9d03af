//! Job-Application Intake Relay
//!
//! Accepts a job-application form post over HTTP, sanitizes and validates
//! it, rate-limits by client address, and relays the submission as an email
//! to a fixed recipient.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 INTAKE RELAY                      │
//!                    │                                                   │
//!   Form POST        │  ┌─────────┐   ┌───────────┐   ┌──────────────┐  │
//!   ─────────────────┼─▶│ request │──▶│   input   │──▶│   message    │  │
//!                    │  │  gate   │   │ sanitizer │   │   builder    │  │
//!                    │  └────┬────┘   └───────────┘   └──────┬───────┘  │
//!                    │       │                                │          │
//!                    │       ▼                                ▼          │
//!   JSON response    │  ┌─────────┐                   ┌──────────────┐  │     SMTP
//!   ◀────────────────┼──│rate-limit│                  │   delivery   │──┼───▶ relay
//!                    │  │  store  │                   │   adapter    │  │
//!                    │  └─────────┘                   └──────────────┘  │
//!                    │                                                   │
//!                    │  config · observability (tracing, metrics)        │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_relay::config::loader::load_or_default;
use intake_relay::http::HttpServer;
use intake_relay::mail::SmtpMailTransport;
use intake_relay::observability::metrics;

#[derive(Parser)]
#[command(name = "intake-relay")]
#[command(about = "Job-application form to email relay", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("intake-relay v0.1.0 starting");

    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        recipient = %config.mail.recipient,
        rate_window_secs = config.rate_limit.window_secs,
        rate_max = config.rate_limit.max_requests,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let transport = Arc::new(SmtpMailTransport::from_config(&config.mail)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config, transport);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
