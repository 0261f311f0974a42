//! Configuration module for the Freesend client.
//!
//! Holds the API key and base URL a client is built from. Values are fixed
//! once built.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::errors::{FreesendError, FreesendResult};

/// Default base URL for the Freesend API.
pub const DEFAULT_BASE_URL: &str = "https://freesend.metafog.io";

/// Timeout applied to every request (30 seconds).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the send endpoint, relative to the base URL.
pub const SEND_EMAIL_PATH: &str = "api/send-email";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FREESEND_API_KEY";

/// Environment variable holding an optional base URL override.
pub const BASE_URL_ENV: &str = "FREESEND_BASE_URL";

/// Configuration for the Freesend client.
#[derive(Clone)]
pub struct FreesendConfig {
    api_key: SecretString,
    base_url: String,
}

impl FreesendConfig {
    /// Creates a configuration with the default base URL.
    pub fn new(api_key: impl Into<String>) -> FreesendResult<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a new configuration builder.
    pub fn builder() -> FreesendConfigBuilder {
        FreesendConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FREESEND_API_KEY` (required): API key for authentication
    /// - `FREESEND_BASE_URL` (optional): Custom base URL
    pub fn from_env() -> FreesendResult<Self> {
        Self::from_env_vars(API_KEY_ENV, BASE_URL_ENV)
    }

    pub(crate) fn from_env_vars(key_var: &str, base_url_var: &str) -> FreesendResult<Self> {
        let mut builder = FreesendConfigBuilder::new().api_key_from_env(key_var)?;

        if let Ok(base_url) = std::env::var(base_url_var) {
            builder = builder.base_url(base_url);
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the base URL exactly as configured.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for FreesendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreesendConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub(crate) fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{}", tail)
    } else {
        "****".to_string()
    }
}

/// Builder for `FreesendConfig`.
#[derive(Default)]
pub struct FreesendConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl FreesendConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> FreesendResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| {
            FreesendError::configuration(format!("Environment variable {} not set", var_name))
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> FreesendResult<FreesendConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| FreesendError::configuration("API key is required"))?;

        if api_key.is_empty() {
            return Err(FreesendError::configuration("API key cannot be empty"));
        }

        // An empty override falls back to the production origin.
        let base_url = match self.base_url {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_BASE_URL.to_string(),
        };

        let parsed = url::Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FreesendError::configuration(format!(
                "Base URL must use http or https: {}",
                base_url
            )));
        }

        Ok(FreesendConfig {
            api_key: SecretString::new(api_key),
            base_url,
        })
    }
}
