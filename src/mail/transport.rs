//! Mail delivery behind a trait seam.
//!
//! The builder produces finished message bytes; a transport only moves them.
//! The SMTP implementation hands the raw message to the relay together with
//! an envelope derived from the configured sender and recipient.

use async_trait::async_trait;
use lettre::{
    address::Envelope,
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use thiserror::Error;

use crate::config::schema::{SmtpConfig, TlsMode};
use crate::config::MailConfig;
use crate::mail::builder::OutboundMessage;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid mail address: {0}")]
    Address(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// External sink that accepts a fully formed message and attempts delivery.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), TransportError>;
}

/// SMTP relay transport.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
}

impl SmtpMailTransport {
    pub fn from_config(mail: &MailConfig) -> Result<Self, TransportError> {
        let sender = parse_address(&mail.from_address)?;
        let mailer = build_mailer(&mail.smtp)?;
        Ok(Self { mailer, sender })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        let recipient = parse_address(&message.recipient)?;
        let envelope = Envelope::new(Some(self.sender.clone()), vec![recipient])
            .map_err(|e| TransportError::Address(e.to_string()))?;

        self.mailer
            .send_raw(&envelope, &message.to_rfc822())
            .await
            .map_err(|e| TransportError::Smtp(e.to_string()))?;

        tracing::debug!(recipient = %message.recipient, "message relayed");
        Ok(())
    }
}

fn build_mailer(smtp: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
    let mut builder = match smtp.tls {
        TlsMode::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .map_err(|e| TransportError::Smtp(e.to_string()))?,
        TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
            .map_err(|e| TransportError::Smtp(e.to_string()))?,
        TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host),
    };
    builder = builder.port(smtp.port);

    if let (Some(username), Some(password)) = (&smtp.username, &smtp.password) {
        builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
    }

    Ok(builder.build())
}

fn parse_address(raw: &str) -> Result<Address, TransportError> {
    raw.parse::<Address>()
        .map_err(|e| TransportError::Address(format!("{raw}: {e}")))
}
