//! Tests for the email service against the mock transport.

use integrations_freesend::mocks::{mock_client, MockResponse};
use integrations_freesend::transport::TransportError;
use integrations_freesend::{Attachment, FreesendError, SendEmailRequest};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

fn email() -> SendEmailRequest {
    SendEmailRequest::new("test@example.com", "recipient@example.com", "Test Email")
        .with_text("This is a test email")
}

#[tokio::test]
async fn test_send_email_success() {
    let (client, transport) = mock_client("test-api-key").unwrap();
    transport.queue(MockResponse::sent("Email sent successfully"));

    let response = client.send_email(&email()).await.unwrap();

    assert_eq!(response.message, "Email sent successfully");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_send_email_request_shape() {
    let (client, transport) = mock_client("test-api-key").unwrap();
    transport.queue(MockResponse::sent("ok"));

    let request = email()
        .with_from_name("Your Company")
        .with_attachment(
            Attachment::from_content("invoice.pdf", "JVBERi0=").with_content_type("application/pdf"),
        );
    client.send_email(&request).await.unwrap();

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.method, http::Method::POST);
    assert_eq!(recorded.path, "api/send-email");
    assert_eq!(
        recorded.headers.get("Authorization").map(String::as_str),
        Some("Bearer test-api-key")
    );
    assert_eq!(
        recorded.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(
        recorded.json().unwrap(),
        json!({
            "fromEmail": "test@example.com",
            "to": "recipient@example.com",
            "subject": "Test Email",
            "fromName": "Your Company",
            "text": "This is a test email",
            "attachments": [{
                "filename": "invoice.pdf",
                "content": "JVBERi0=",
                "contentType": "application/pdf"
            }]
        })
    );
}

#[tokio::test]
async fn test_send_email_api_error() {
    let (client, transport) = mock_client("bad-key").unwrap();
    transport.queue(MockResponse::error(401, "Invalid API key"));

    let error = client.send_email(&email()).await.unwrap_err();

    match error {
        FreesendError::Api {
            ref message,
            status_code,
        } => {
            assert_eq!(message, "Invalid API key");
            assert_eq!(status_code, Some(401));
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_email_network_error() {
    let (client, transport) = mock_client("test-api-key").unwrap();
    transport.queue_connection_refused();

    let error = client.send_email(&email()).await.unwrap_err();

    assert!(matches!(error, FreesendError::Network { .. }));
    assert!(error.message().contains("Connection refused"));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_send_email_timeout_is_network_error() {
    let (client, transport) = mock_client("test-api-key").unwrap();
    transport.queue_failure(TransportError::Timeout {
        timeout: Duration::from_secs(30),
        message: "operation timed out".to_string(),
    });

    let error = client.send_email(&email()).await.unwrap_err();

    assert!(matches!(error, FreesendError::Network { .. }));
    assert!(error.message().contains("30s"));
    assert!(error.message().contains("operation timed out"));
}

#[tokio::test]
async fn test_send_email_invalid_json_response() {
    let (client, transport) = mock_client("test-api-key").unwrap();
    transport.queue(MockResponse::raw(200, "not json"));

    let error = client.send_email(&email()).await.unwrap_err();

    assert!(matches!(error, FreesendError::Api { .. }));
    assert_eq!(error.message(), "Invalid JSON response from server");
}

#[tokio::test]
async fn test_validation_failures_never_reach_transport() {
    let (client, transport) = mock_client("test-api-key").unwrap();

    let cases = vec![
        (
            SendEmailRequest::new("", "recipient@example.com", "s").with_text("t"),
            "fromEmail",
        ),
        (
            SendEmailRequest::new("test@example.com", "", "s").with_text("t"),
            "to",
        ),
        (
            SendEmailRequest::new("test@example.com", "recipient@example.com", "").with_text("t"),
            "subject",
        ),
        (
            SendEmailRequest::new("test@example.com", "recipient@example.com", "s"),
            "text or html",
        ),
        (
            SendEmailRequest::new("invalid-email", "recipient@example.com", "s").with_text("t"),
            "fromEmail",
        ),
        (
            email().with_attachment(Attachment::from_content("", "YQ==")),
            "filename",
        ),
        (
            email().with_attachment(Attachment {
                filename: "file.pdf".to_string(),
                ..Default::default()
            }),
            "content or url",
        ),
        (
            email().with_attachment(Attachment {
                filename: "file.pdf".to_string(),
                content: Some("base64".to_string()),
                url: Some("https://example.com/f.pdf".to_string()),
                content_type: None,
            }),
            "cannot have both",
        ),
    ];

    for (request, expected) in cases {
        let error = client.send_email(&request).await.unwrap_err();

        assert!(
            matches!(error, FreesendError::Validation { .. }),
            "expected validation error for {:?}",
            request
        );
        assert!(
            error.message().contains(expected),
            "{:?} should mention {:?}",
            error.message(),
            expected
        );
    }

    assert_eq!(transport.request_count(), 0);
}
