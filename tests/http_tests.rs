//! End-to-end tests against a local mock HTTP server.

use integrations_freesend::{Attachment, FreesendClient, FreesendError, SendEmailRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> FreesendClient {
    FreesendClient::builder()
        .api_key("test-api-key")
        .base_url(server.uri())
        .build()
        .expect("Failed to build client")
}

fn email() -> SendEmailRequest {
    SendEmailRequest::new("test@example.com", "recipient@example.com", "Test")
        .with_text("Test")
}

#[tokio::test]
async fn test_send_email_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "fromEmail": "test@example.com",
            "to": "recipient@example.com",
            "subject": "Test",
            "text": "Test",
            "attachments": [{
                "filename": "g.pdf",
                "url": "https://example.com/g.pdf"
            }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Email sent successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request =
        email().with_attachment(Attachment::from_url("g.pdf", "https://example.com/g.pdf"));

    let response = client.send_email(&request).await.unwrap();
    assert_eq!(response.message, "Email sent successfully");
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API key"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.send_email(&email()).await.unwrap_err();

    assert!(matches!(error, FreesendError::Api { .. }));
    assert_eq!(error.message(), "Invalid API key");
    assert_eq!(error.status_code(), Some(401));
}

#[tokio::test]
async fn test_error_status_without_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.send_email(&email()).await.unwrap_err();

    assert_eq!(error.message(), "Unknown error occurred");
    assert_eq!(error.status_code(), Some(503));
}

#[tokio::test]
async fn test_html_body_is_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.send_email(&email()).await.unwrap_err();

    assert!(matches!(error, FreesendError::Api { .. }));
    assert_eq!(error.message(), "Invalid JSON response from server");
    assert_eq!(error.status_code(), None);
}

#[tokio::test]
async fn test_success_without_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "abc"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.send_email(&email()).await.unwrap();

    assert_eq!(response.message, "");
}

#[tokio::test]
async fn test_invalid_request_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = SendEmailRequest::new("test@example.com", "invalid-email", "Test").with_text("x");

    let error = client.send_email(&request).await.unwrap_err();
    assert_eq!(error.message(), "invalid to format");
}

#[tokio::test]
async fn test_connection_refused() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = FreesendClient::builder()
        .api_key("test-api-key")
        .base_url(format!("http://127.0.0.1:{}", port))
        .build()
        .unwrap();

    let error = client.send_email(&email()).await.unwrap_err();

    assert!(matches!(error, FreesendError::Network { .. }));
    assert!(error
        .message()
        .to_lowercase()
        .contains("connection refused"));
}
