//! Outbound message construction.
//!
//! Pure transformation of a validated [`Submission`] into the message the
//! transport will deliver. Header values only ever receive sanitized field
//! values, so nothing client-controlled can introduce new header lines.

use crate::config::MailConfig;
use crate::form::Submission;
use crate::mail::mime::{MimePart, MultipartBody};

/// A fully composed message, handed to the delivery adapter immutably.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub recipient: String,
    pub subject: String,
    /// Ordered header fields (From, Reply-To, MIME-Version, Content-Type).
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl OutboundMessage {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Full RFC 822 bytes for raw SMTP delivery: recipient and subject
    /// lines, the stored headers in order, a blank line, then the body.
    pub fn to_rfc822(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 512);
        out.extend_from_slice(format!("To: {}\r\n", self.recipient).as_bytes());
        out.extend_from_slice(format!("Subject: {}\r\n", self.subject).as_bytes());
        for (name, value) in &self.headers {
            out.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out
    }
}

/// Compose the outbound message for one submission.
pub fn build(submission: &Submission, mail: &MailConfig) -> OutboundMessage {
    let subject = format!(
        "{}{} — {}",
        mail.subject_prefix, submission.subject, submission.name
    );
    let body_text = plain_text_body(submission);

    let mut headers = vec![
        (
            "From".to_string(),
            format!("{} <{}>", mail.from_name, mail.from_address),
        ),
        ("Reply-To".to_string(), submission.email.clone()),
        ("MIME-Version".to_string(), "1.0".to_string()),
    ];

    let body = match &submission.attachment {
        Some(attachment) => {
            let multipart = MultipartBody::new(vec![
                MimePart::Text { content: body_text },
                MimePart::Attachment {
                    mime_type: attachment.mime_type.to_string(),
                    filename: attachment.filename.clone(),
                    bytes: attachment.bytes.clone(),
                },
            ]);
            headers.push((
                "Content-Type".to_string(),
                format!("multipart/mixed; boundary=\"{}\"", multipart.boundary()),
            ));
            multipart.encode()
        }
        None => {
            headers.push((
                "Content-Type".to_string(),
                "text/plain; charset=UTF-8".to_string(),
            ));
            body_text.into_bytes()
        }
    };

    OutboundMessage {
        recipient: mail.recipient.clone(),
        subject,
        headers,
        body,
    }
}

/// Labeled lines in fixed order, then the free-text message block.
fn plain_text_body(submission: &Submission) -> String {
    format!(
        "Nueva postulación desde el sitio web\n\n\
         Nombre:     {}\n\
         Email:      {}\n\
         Puesto:     {}\n\
         Rubro:      {}\n\
         Ubicación:  {}\n\
         Asunto:     {}\n\n\
         Mensaje:\n{}\n",
        submission.name,
        submission.email,
        submission.puesto,
        submission.rubro,
        submission.ubicacion,
        submission.subject,
        submission.message,
    )
}
