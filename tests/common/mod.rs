//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request},
    Router,
};

use intake_relay::config::AppConfig;
use intake_relay::http::HttpServer;
use intake_relay::mail::{MailTransport, OutboundMessage, TransportError};

pub const TEST_BOUNDARY: &str = "------------test-boundary-7MA4YWxk";

/// Transport that records every delivered message instead of sending it.
#[derive(Default)]
pub struct CaptureTransport {
    sent: Mutex<Vec<OutboundMessage>>,
    failing: AtomicBool,
}

impl CaptureTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let transport = Self::default();
        transport.failing.store(true, Ordering::SeqCst);
        Arc::new(transport)
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for CaptureTransport {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Smtp("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Config with a small attachment cap and room for several requests.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.intake.max_attachment_mib = 1;
    config.rate_limit.max_requests = 50;
    config
}

/// Assemble the full router the binary serves, minus the socket.
pub fn app(config: AppConfig, transport: Arc<CaptureTransport>) -> Router {
    HttpServer::new(config, transport).into_router()
}

pub fn client(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, last_octet], 40000))
}

/// POST with the connection info the real listener would attach.
pub fn post(content_type: &str, body: Vec<u8>, from: SocketAddr) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/submit")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    request.extensions_mut().insert(ConnectInfo(from));
    request
}

pub fn urlencoded_post(pairs: &[(&str, &str)], from: SocketAddr) -> Request<Body> {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencode(v)))
        .collect::<Vec<_>>()
        .join("&");
    post(
        "application/x-www-form-urlencoded",
        body.into_bytes(),
        from,
    )
}

/// Multipart request body with text fields and an optional `cv` file.
pub fn multipart_post(
    pairs: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
    from: SocketAddr,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in pairs {
        body.extend_from_slice(
            format!(
                "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; name=\"cv\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{TEST_BOUNDARY}--\r\n").as_bytes());

    post(
        &format!("multipart/form-data; boundary={TEST_BOUNDARY}"),
        body,
        from,
    )
}

/// Percent-encode enough for test payloads.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
