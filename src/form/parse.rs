//! Raw form extraction.
//!
//! Accepts both encodings the upstream form can produce:
//! `multipart/form-data` (required when a file is attached) and plain
//! `application/x-www-form-urlencoded`. Output is the untrusted raw field
//! map plus the optional upload; sanitization happens later.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Form, FromRequest, Multipart},
    http::{header, Request},
};

use crate::error::SubmitError;

/// Form field that carries the résumé upload.
pub const FILE_FIELD: &str = "cv";

/// Untrusted fields exactly as the client sent them.
#[derive(Debug, Default)]
pub struct RawForm {
    fields: HashMap<String, String>,
    upload: Option<RawUpload>,
}

/// An uploaded file before any checks.
#[derive(Debug)]
pub struct RawUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RawForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn upload(&self) -> Option<&RawUpload> {
        self.upload.as_ref()
    }

    pub fn into_upload(self) -> Option<RawUpload> {
        self.upload
    }

    #[cfg(test)]
    pub fn from_parts(fields: HashMap<String, String>, upload: Option<RawUpload>) -> Self {
        Self { fields, upload }
    }
}

/// Read the request body into a [`RawForm`].
pub async fn read_form(request: Request<Body>) -> Result<RawForm, SubmitError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        read_multipart(request).await
    } else {
        read_urlencoded(request).await
    }
}

async fn read_multipart(request: Request<Body>) -> Result<RawForm, SubmitError> {
    let mut multipart = Multipart::from_request(request, &()).await.map_err(|e| {
        tracing::debug!(error = %e, "rejected unreadable multipart body");
        SubmitError::ValidationFailed
    })?;

    let mut form = RawForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "multipart stream ended early");
                return Err(SubmitError::ValidationFailed);
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| {
                    tracing::debug!(error = %e, "failed to read upload bytes");
                    SubmitError::AttachmentUnreadable
                })?;
            // An empty file part means "no file chosen"; treat it as absent.
            if !filename.is_empty() && !bytes.is_empty() {
                form.upload = Some(RawUpload { filename, bytes: bytes.to_vec() });
            }
        } else if !name.is_empty() {
            let value = field.text().await.map_err(|e| {
                tracing::debug!(field = %name, error = %e, "failed to read form field");
                SubmitError::ValidationFailed
            })?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

async fn read_urlencoded(request: Request<Body>) -> Result<RawForm, SubmitError> {
    let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected unreadable form body");
            SubmitError::ValidationFailed
        })?;
    Ok(RawForm { fields, upload: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content_type: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit")
            .header(header::CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_urlencoded_fields() {
        let request = post(
            "application/x-www-form-urlencoded",
            "name=Ada&email=ada%40example.com&puesto=Dev",
        );
        let form = read_form(request).await.unwrap();
        assert_eq!(form.field("name"), Some("Ada"));
        assert_eq!(form.field("email"), Some("ada@example.com"));
        assert_eq!(form.field("puesto"), Some("Dev"));
        assert!(form.upload().is_none());
    }

    #[tokio::test]
    async fn test_reads_multipart_fields_and_file() {
        let body = concat!(
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"name\"\r\n\r\n",
            "Ada\r\n",
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"cv\"; filename=\"cv.pdf\"\r\n",
            "Content-Type: application/pdf\r\n\r\n",
            "%PDF-1.4 fake\r\n",
            "--XBOUND--\r\n",
        );
        let request = post("multipart/form-data; boundary=XBOUND", body);
        let form = read_form(request).await.unwrap();
        assert_eq!(form.field("name"), Some("Ada"));
        let upload = form.upload().unwrap();
        assert_eq!(upload.filename, "cv.pdf");
        assert_eq!(upload.bytes, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn test_empty_file_part_is_treated_as_absent() {
        let body = concat!(
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"cv\"; filename=\"\"\r\n",
            "Content-Type: application/octet-stream\r\n\r\n",
            "\r\n",
            "--XBOUND--\r\n",
        );
        let request = post("multipart/form-data; boundary=XBOUND", body);
        let form = read_form(request).await.unwrap();
        assert!(form.upload().is_none());
    }

    #[tokio::test]
    async fn test_garbage_body_is_a_validation_failure() {
        let request = post("application/x-www-form-urlencoded", Body::from(vec![0xff, 0xfe]));
        let err = read_form(request).await.unwrap_err();
        assert!(matches!(err, SubmitError::ValidationFailed));
    }
}
