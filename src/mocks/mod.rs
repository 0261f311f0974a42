//! Mock implementations for testing.
//!
//! `MockTransport` answers sends from a queue of canned responses or
//! transport failures and records every request it sees.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::{FreesendClient, FreesendClientBuilder};
use crate::errors::FreesendResult;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: http::Method,
    /// Request path.
    pub path: String,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    /// Parses the recorded body as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a 200 JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates a successful send response.
    pub fn sent(message: &str) -> Self {
        Self::json(&serde_json::json!({ "message": message }))
    }

    /// Creates an error response in the service's `{"error": ...}` shape.
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(&serde_json::json!({ "error": message })).with_status(status)
    }

    /// Creates a response with a raw, possibly non-JSON body.
    pub fn raw(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

enum MockOutcome {
    Response(MockResponse),
    Failure(TransportError),
}

/// Mock HTTP transport for testing.
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.outcomes).push_back(MockOutcome::Response(response));
    }

    /// Queues a transport failure.
    pub fn queue_failure(&self, error: TransportError) {
        lock(&self.outcomes).push_back(MockOutcome::Failure(error));
    }

    /// Queues a refused connection.
    pub fn queue_connection_refused(&self) {
        self.queue_failure(TransportError::Connection {
            message: "Connection refused".to_string(),
        });
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            path: request.path,
            body: request.body,
            headers: request.headers,
        });

        let outcome = lock(&self.outcomes).pop_front();
        match outcome {
            Some(MockOutcome::Response(response)) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            Some(MockOutcome::Failure(error)) => Err(error),
            None => Err(TransportError::Request {
                message: "No mock response configured".to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Builds a client wired to a fresh `MockTransport`, returning both.
pub fn mock_client(api_key: &str) -> FreesendResult<(FreesendClient, Arc<MockTransport>)> {
    let transport = Arc::new(MockTransport::new());
    let client = FreesendClientBuilder::new()
        .api_key(api_key)
        .transport(Arc::clone(&transport) as Arc<dyn HttpTransport>)
        .build()?;
    Ok((client, transport))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_queue_order() {
        let transport = MockTransport::new();
        transport.queue(MockResponse::sent("first"));
        transport.queue(MockResponse::error(401, "second"));

        let first = transport.send(HttpRequest::post("a")).await.unwrap();
        let second = transport.send(HttpRequest::post("b")).await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 401);
        assert!(String::from_utf8_lossy(&second.body).contains("second"));
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::new();
        transport.queue(MockResponse::sent("ok"));

        transport
            .send(HttpRequest::post("api/send-email").with_body(b"{\"to\":\"x\"}".to_vec()))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.path, "api/send-email");
        assert_eq!(request.json().unwrap()["to"], "x");
    }

    #[tokio::test]
    async fn test_mock_transport_failure_and_exhaustion() {
        let transport = MockTransport::new();
        transport.queue_connection_refused();

        let refused = transport.send(HttpRequest::post("a")).await.unwrap_err();
        assert!(refused.to_string().contains("Connection refused"));

        let exhausted = transport.send(HttpRequest::post("a")).await;
        assert!(exhausted.is_err());
        assert_eq!(transport.request_count(), 2);
    }
}
