//! Validated, sanitized submission data.

use crate::config::IntakeConfig;
use crate::error::SubmitError;
use crate::form::parse::RawForm;
use crate::form::sanitize::clean;

use email_address::EmailAddress;

/// Hidden field legitimate users never fill.
pub const HONEYPOT_FIELD: &str = "website";

/// One sanitized form post. Constructed fresh per request, never persisted.
#[derive(Debug)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: String,
    pub puesto: String,
    pub rubro: String,
    pub ubicacion: String,
    pub attachment: Option<Attachment>,
}

/// Résumé attachment that passed the size and format checks.
#[derive(Debug)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl Submission {
    /// Run the sanitizer stage: honeypot, field cleaning, required-field and
    /// attachment validation.
    pub fn from_form(
        form: RawForm,
        intake: &IntakeConfig,
        default_subject: &str,
    ) -> Result<Self, SubmitError> {
        // Bots fill the hidden field; humans never see it. Checked against the
        // raw value so even whitespace trips it.
        if form.field(HONEYPOT_FIELD).is_some_and(|v| !v.is_empty()) {
            return Err(SubmitError::BotDetected);
        }

        let name = clean(form.field("name"));
        let email = clean(form.field("email"));
        let message = clean(form.field("message"));
        // The default applies only when the field is absent; a submitted empty
        // subject stays empty.
        let subject = match form.field("subject") {
            Some(raw) => clean(Some(raw)),
            None => clean(Some(default_subject)),
        };
        let puesto = clean(form.field("puesto"));
        let rubro = clean(form.field("rubro"));
        let ubicacion = clean(form.field("ubicacion"));

        // One combined check; the response does not say which field failed.
        if name.is_empty() || email.is_empty() || !EmailAddress::is_valid(&email) {
            return Err(SubmitError::ValidationFailed);
        }

        let attachment = match form.into_upload() {
            Some(upload) => Some(Attachment::from_upload(upload.filename, upload.bytes, intake)?),
            None => None,
        };

        Ok(Self {
            name,
            email,
            message,
            subject,
            puesto,
            rubro,
            ubicacion,
            attachment,
        })
    }
}

impl Attachment {
    /// Validate an upload and derive its MIME type.
    ///
    /// The type comes from the allowed extension through a static mapping;
    /// client-supplied content types are never consulted.
    pub fn from_upload(
        filename: String,
        bytes: Vec<u8>,
        intake: &IntakeConfig,
    ) -> Result<Self, SubmitError> {
        if bytes.len() > intake.max_attachment_bytes() {
            return Err(SubmitError::FileTooLarge(intake.max_attachment_mib));
        }

        let filename = safe_filename(&filename);
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if extension.is_empty() || !intake.allowed_extensions.iter().any(|e| *e == extension) {
            return Err(SubmitError::FormatNotAllowed);
        }

        Ok(Self {
            filename,
            mime_type: mime_for_extension(&extension),
            bytes,
        })
    }
}

/// Basename only, with header-hostile characters removed. The filename is
/// echoed inside quoted MIME header parameters.
fn safe_filename(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    base.chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '"'))
        .collect()
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::form::parse::RawUpload;

    const DEFAULT_SUBJECT: &str = "Postulación";

    fn intake() -> IntakeConfig {
        IntakeConfig::default()
    }

    fn form(pairs: &[(&str, &str)]) -> RawForm {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RawForm::from_parts(fields, None)
    }

    fn form_with_upload(pairs: &[(&str, &str)], filename: &str, bytes: &[u8]) -> RawForm {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RawForm::from_parts(
            fields,
            Some(RawUpload { filename: filename.to_string(), bytes: bytes.to_vec() }),
        )
    }

    fn valid_pairs() -> Vec<(&'static str, &'static str)> {
        vec![("name", "Ada Lovelace"), ("email", "ada@example.com")]
    }

    #[test]
    fn test_minimal_valid_submission() {
        let submission =
            Submission::from_form(form(&valid_pairs()), &intake(), DEFAULT_SUBJECT).unwrap();
        assert_eq!(submission.name, "Ada Lovelace");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.subject, "Postulación");
        assert_eq!(submission.puesto, "");
        assert!(submission.attachment.is_none());
    }

    #[test]
    fn test_submitted_empty_subject_is_kept_empty() {
        let mut pairs = valid_pairs();
        pairs.push(("subject", ""));
        let submission = Submission::from_form(form(&pairs), &intake(), DEFAULT_SUBJECT).unwrap();
        assert_eq!(submission.subject, "");
    }

    #[test]
    fn test_honeypot_rejects_even_whitespace() {
        let mut pairs = valid_pairs();
        pairs.push((HONEYPOT_FIELD, " "));
        let err = Submission::from_form(form(&pairs), &intake(), DEFAULT_SUBJECT).unwrap_err();
        assert!(matches!(err, SubmitError::BotDetected));
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let err = Submission::from_form(
            form(&[("email", "ada@example.com")]),
            &intake(),
            DEFAULT_SUBJECT,
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::ValidationFailed));
    }

    #[test]
    fn test_email_without_at_fails_validation() {
        let err = Submission::from_form(
            form(&[("name", "Ada"), ("email", "ada.example.com")]),
            &intake(),
            DEFAULT_SUBJECT,
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::ValidationFailed));
    }

    #[test]
    fn test_fields_are_sanitized() {
        let mut pairs = valid_pairs();
        pairs.push(("puesto", "  Dev\r\nOps  "));
        pairs.push(("message", "<b>hi</b>"));
        let submission = Submission::from_form(form(&pairs), &intake(), DEFAULT_SUBJECT).unwrap();
        assert_eq!(submission.puesto, "Dev Ops");
        assert_eq!(submission.message, "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn test_pdf_attachment_is_accepted_with_derived_mime() {
        let submission = Submission::from_form(
            form_with_upload(&valid_pairs(), "cv.PDF", b"%PDF-1.4"),
            &intake(),
            DEFAULT_SUBJECT,
        )
        .unwrap();
        let attachment = submission.attachment.unwrap();
        assert_eq!(attachment.mime_type, "application/pdf");
        assert_eq!(attachment.filename, "cv.PDF");
    }

    #[test]
    fn test_exe_is_rejected_even_if_content_looks_like_pdf() {
        let err = Submission::from_form(
            form_with_upload(&valid_pairs(), "cv.exe", b"%PDF-1.4 actually a pdf"),
            &intake(),
            DEFAULT_SUBJECT,
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::FormatNotAllowed));
    }

    #[test]
    fn test_extensionless_filename_is_rejected() {
        let err = Submission::from_form(
            form_with_upload(&valid_pairs(), "resume", b"data"),
            &intake(),
            DEFAULT_SUBJECT,
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::FormatNotAllowed));
    }

    #[test]
    fn test_oversized_attachment_is_rejected() {
        let intake = IntakeConfig { max_attachment_mib: 1, ..IntakeConfig::default() };
        let too_big = vec![0u8; 1024 * 1024 + 1];
        let err = Submission::from_form(
            form_with_upload(&valid_pairs(), "cv.pdf", &too_big),
            &intake,
            DEFAULT_SUBJECT,
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::FileTooLarge(1)));
    }

    #[test]
    fn test_filename_is_reduced_to_a_safe_basename() {
        let attachment = Attachment::from_upload(
            "../../etc/evil\r\n\".pdf".to_string(),
            b"data".to_vec(),
            &intake(),
        )
        .unwrap();
        assert_eq!(attachment.filename, "evil.pdf");
    }

    #[test]
    fn test_docx_mime_mapping() {
        let attachment =
            Attachment::from_upload("cv.docx".to_string(), b"data".to_vec(), &intake()).unwrap();
        assert_eq!(
            attachment.mime_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }
}
