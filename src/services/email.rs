//! Email sending service.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::auth::AuthProvider;
use crate::config::SEND_EMAIL_PATH;
use crate::errors::{FreesendError, FreesendResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::email::{SendEmailRequest, SendEmailResponse};

const INVALID_JSON_MESSAGE: &str = "Invalid JSON response from server";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Service for the send-email endpoint.
pub struct EmailService {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
}

impl EmailService {
    /// Creates a new email service.
    pub fn new(transport: Arc<dyn HttpTransport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { transport, auth }
    }

    /// Validates and sends an email.
    ///
    /// Validation failures are returned before any network activity.
    #[instrument(skip(self, request), fields(to = %request.to, attachments = request.attachments.len()))]
    pub async fn send(&self, request: &SendEmailRequest) -> FreesendResult<SendEmailResponse> {
        if let Err(e) = request.validate() {
            tracing::debug!(error = %e, "Rejected email request");
            return Err(e);
        }

        let http_request = self.build_request(request)?;

        tracing::debug!("Dispatching email");
        let response = self.transport.send(http_request).await.map_err(|e| {
            tracing::warn!(error = %e, "Transport failure");
            FreesendError::network(e.to_string())
        })?;

        let result = interpret_response(&response);
        match &result {
            Ok(_) => tracing::debug!(status = response.status, "Email accepted"),
            Err(e) => tracing::warn!(status = response.status, error = %e, "Email rejected"),
        }
        result
    }

    /// Builds an HTTP request.
    fn build_request(&self, request: &SendEmailRequest) -> FreesendResult<HttpRequest> {
        let body = request.to_payload().to_vec()?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        self.auth.apply_auth(&mut headers);

        Ok(HttpRequest {
            headers,
            ..HttpRequest::post(SEND_EMAIL_PATH).with_body(body)
        })
    }
}

/// Maps an HTTP response from the send endpoint to a result.
///
/// An unparseable body is an API error whatever the status. A parseable body
/// that is not a JSON object is unexpected.
pub fn interpret_response(response: &HttpResponse) -> FreesendResult<SendEmailResponse> {
    let body = response.json::<serde_json::Value>().map_err(|_| FreesendError::Api {
        message: INVALID_JSON_MESSAGE.to_string(),
        status_code: None,
    })?;

    let object = body.as_object().ok_or_else(|| {
        FreesendError::unexpected(format!(
            "expected a JSON object in response (HTTP {})",
            response.status
        ))
    })?;

    if !response.is_success() {
        let message =
            string_field(object.get("error")).unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        return Err(FreesendError::api(response.status, message));
    }

    Ok(SendEmailResponse {
        message: string_field(object.get("message")).unwrap_or_default(),
    })
}

fn string_field(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl std::fmt::Debug for EmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailService").finish()
    }
}
