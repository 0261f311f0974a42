//! Email request and response types.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::payload::SendEmailPayload;
use crate::errors::{FreesendError, FreesendResult};

/// Loose `local@domain.tld` shape. Accepts some addresses RFC 5322 rejects.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Returns true if `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// A single file attached to an email.
///
/// Exactly one of `content` and `url` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// Base64-encoded file bytes.
    pub content: Option<String>,
    /// External location the service fetches the file from.
    pub url: Option<String>,
    /// Advisory MIME type.
    pub content_type: Option<String>,
}

impl Attachment {
    /// Creates an attachment from already base64-encoded content.
    pub fn from_content(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Creates an attachment the service fetches from `url`.
    pub fn from_url(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Creates an attachment from raw bytes, base64-encoding them.
    pub fn from_bytes(filename: impl Into<String>, data: impl AsRef<[u8]>) -> Self {
        Self::from_content(filename, BASE64.encode(data))
    }

    /// Reads a local file into an inline attachment.
    ///
    /// The filename is taken from the last path component and the content
    /// type is guessed from its extension. Only the encoded bytes are sent;
    /// the path itself never leaves the process.
    pub fn from_file(path: impl AsRef<Path>) -> FreesendResult<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                FreesendError::validation_field(
                    format!("attachment path has no file name: {}", path.display()),
                    "attachments",
                )
            })?;

        let data = std::fs::read(path).map_err(|e| {
            FreesendError::unexpected(format!(
                "failed to read attachment {}: {}",
                path.display(),
                e
            ))
        })?;

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok(Self::from_bytes(filename, data).with_content_type(content_type))
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the inline content if present and non-empty.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Returns the external URL if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Returns the content type if present and non-empty.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref().filter(|t| !t.is_empty())
    }

    /// Validates the attachment.
    pub fn validate(&self) -> FreesendResult<()> {
        if self.filename.is_empty() {
            return Err(FreesendError::validation_field(
                "attachment filename required",
                "filename",
            ));
        }

        match (self.content(), self.url()) {
            (None, None) => Err(FreesendError::validation_field(
                "attachment must have content or url",
                "content",
            )),
            (Some(_), Some(_)) => Err(FreesendError::validation_field(
                "attachment cannot have both content and url",
                "url",
            )),
            _ => Ok(()),
        }
    }
}

/// An outbound email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendEmailRequest {
    /// Sender address.
    pub from_email: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Sender display name.
    pub from_name: Option<String>,
    /// Plain text body.
    pub text: Option<String>,
    /// HTML body.
    pub html: Option<String>,
    /// Attachments, in the order they should appear.
    pub attachments: Vec<Attachment>,
}

impl SendEmailRequest {
    /// Creates a request with the required fields. At least one of
    /// [`with_text`](Self::with_text) or [`with_html`](Self::with_html) must
    /// also be set before sending.
    pub fn new(
        from_email: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            from_email: from_email.into(),
            to: to.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// Sets the sender display name.
    pub fn with_from_name(mut self, from_name: impl Into<String>) -> Self {
        self.from_name = Some(from_name.into());
        self
    }

    /// Sets the plain text body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the HTML body.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Appends an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Replaces all attachments.
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Validates the request.
    ///
    /// Rules are checked in a fixed order and the first failure is returned,
    /// so the same request always yields the same message.
    pub fn validate(&self) -> FreesendResult<()> {
        if self.from_email.is_empty() {
            return Err(FreesendError::validation_field(
                "missing fromEmail",
                "fromEmail",
            ));
        }

        if self.to.is_empty() {
            return Err(FreesendError::validation_field("missing to", "to"));
        }

        if self.subject.is_empty() {
            return Err(FreesendError::validation_field("missing subject", "subject"));
        }

        if !is_present(&self.text) && !is_present(&self.html) {
            return Err(FreesendError::validation("missing text or html"));
        }

        if !is_valid_email(&self.from_email) {
            return Err(FreesendError::validation_field(
                "invalid fromEmail format",
                "fromEmail",
            ));
        }

        if !is_valid_email(&self.to) {
            return Err(FreesendError::validation_field("invalid to format", "to"));
        }

        for (i, attachment) in self.attachments.iter().enumerate() {
            if let Err(e) = attachment.validate() {
                let field = match e.field() {
                    Some(f) => format!("attachments[{}].{}", i, f),
                    None => format!("attachments[{}]", i),
                };
                return Err(FreesendError::validation_field(e.message(), field));
            }
        }

        Ok(())
    }

    /// Builds the wire payload for this request.
    ///
    /// Only meaningful after [`validate`](Self::validate) has succeeded.
    pub fn to_payload(&self) -> SendEmailPayload<'_> {
        SendEmailPayload::from_request(self)
    }
}

/// Successful response from the send endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailResponse {
    /// Message returned by the service, empty when the service sent none.
    #[serde(default)]
    pub message: String,
}
