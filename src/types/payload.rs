//! Wire-format payload for the send endpoint.
//!
//! Absent optional fields are omitted from the JSON entirely; the service
//! does not accept `null` placeholders. Field order follows declaration order.

use serde::Serialize;

use super::email::{Attachment, SendEmailRequest};

/// JSON body of `POST /api/send-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailPayload<'a> {
    /// Sender address.
    pub from_email: &'a str,
    /// Recipient address.
    pub to: &'a str,
    /// Subject line.
    pub subject: &'a str,
    /// Sender display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<&'a str>,
    /// Plain text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<&'a str>,
    /// Attachments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPayload<'a>>,
}

/// One attachment on the wire. There is deliberately no path field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentPayload<'a> {
    /// File name.
    pub filename: &'a str,
    /// Base64-encoded bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    /// External file location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    /// MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<&'a str>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl<'a> SendEmailPayload<'a> {
    /// Builds the payload for a validated request.
    pub fn from_request(request: &'a SendEmailRequest) -> Self {
        Self {
            from_email: &request.from_email,
            to: &request.to,
            subject: &request.subject,
            from_name: non_empty(&request.from_name),
            text: non_empty(&request.text),
            html: non_empty(&request.html),
            attachments: request
                .attachments
                .iter()
                .map(AttachmentPayload::from_attachment)
                .collect(),
        }
    }

    /// Serializes the payload to JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl<'a> AttachmentPayload<'a> {
    /// Builds the wire form of one attachment.
    pub fn from_attachment(attachment: &'a Attachment) -> Self {
        Self {
            filename: &attachment.filename,
            content: attachment.content(),
            url: attachment.url(),
            content_type: attachment.content_type(),
        }
    }
}
