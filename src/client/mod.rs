//! Freesend API client.
//!
//! Provides the main client interface for sending email through Freesend.

use std::sync::Arc;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{FreesendConfig, FreesendConfigBuilder, REQUEST_TIMEOUT};
use crate::errors::{FreesendError, FreesendResult};
use crate::services::EmailService;
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::email::{SendEmailRequest, SendEmailResponse};

/// The main Freesend client.
///
/// Holds read-only configuration and a pooled HTTP transport, so one client
/// can serve any number of concurrent sends.
///
/// # Example
///
/// ```rust,no_run
/// use integrations_freesend::{FreesendClient, SendEmailRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FreesendClient::builder()
///         .api_key("your-api-key")
///         .build()?;
///
///     let request = SendEmailRequest::new("you@yourdomain.com", "them@example.com", "Hello")
///         .with_text("Hello from Freesend");
///
///     let response = client.send_email(&request).await?;
///     println!("{}", response.message);
///     Ok(())
/// }
/// ```
pub struct FreesendClient {
    config: FreesendConfig,
    email_service: EmailService,
}

impl FreesendClient {
    /// Creates a client from a configuration.
    pub fn new(config: FreesendConfig) -> FreesendResult<Self> {
        FreesendClientBuilder::from_config(config).build()
    }

    /// Creates a new client builder.
    pub fn builder() -> FreesendClientBuilder {
        FreesendClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `FREESEND_API_KEY` and optionally `FREESEND_BASE_URL`.
    pub fn from_env() -> FreesendResult<Self> {
        Self::new(FreesendConfig::from_env()?)
    }

    /// Creates a client from an API key, using the default base URL.
    pub fn from_api_key(api_key: impl Into<String>) -> FreesendResult<Self> {
        FreesendClientBuilder::new().api_key(api_key).build()
    }

    /// Validates and sends an email.
    pub async fn send_email(&self, request: &SendEmailRequest) -> FreesendResult<SendEmailResponse> {
        self.email_service.send(request).await
    }

    /// Returns the email service.
    pub fn emails(&self) -> &EmailService {
        &self.email_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FreesendConfig {
        &self.config
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }
}

impl std::fmt::Debug for FreesendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreesendClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the Freesend client.
pub struct FreesendClientBuilder {
    config_builder: FreesendConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl FreesendClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: FreesendConfigBuilder::new(),
            transport: None,
            auth: None,
        }
    }

    /// Creates a builder from an existing configuration.
    ///
    /// Later setters override the values taken from `config`.
    pub fn from_config(config: FreesendConfig) -> Self {
        Self::new()
            .api_key(config.api_key())
            .base_url(config.base_url())
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> FreesendResult<Self> {
        self.config_builder = self.config_builder.api_key_from_env(var_name)?;
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the client.
    pub fn build(self) -> FreesendResult<FreesendClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(config.base_url(), REQUEST_TIMEOUT)
                    .map_err(|e| FreesendError::configuration(e.to_string()))?,
            ),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let email_service = EmailService::new(transport, auth);

        Ok(FreesendClient {
            config,
            email_service,
        })
    }
}

impl Default for FreesendClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
