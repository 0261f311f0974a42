//! Freesend Client Library
//!
//! A Rust client for the Freesend transactional email API. Requests are
//! validated locally, shaped into the service's JSON payload, and sent with a
//! bearer-authenticated POST. Responses and failures come back as a typed
//! result or a [`FreesendError`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_freesend::{Attachment, FreesendClient, SendEmailRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FreesendClient::from_env()?;
//!
//!     let request = SendEmailRequest::new(
//!         "billing@yourdomain.com",
//!         "customer@example.com",
//!         "Your invoice is ready",
//!     )
//!     .with_from_name("Your Company")
//!     .with_html("<h1>Invoice Attached</h1>")
//!     .with_text("Invoice attached.")
//!     .with_attachment(Attachment::from_file("invoice.pdf")?);
//!
//!     let response = client.send_email(&request).await?;
//!     println!("{}", response.message);
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! ```rust,no_run
//! use integrations_freesend::{FreesendClient, FreesendError, SendEmailRequest};
//!
//! # async fn run(client: FreesendClient, request: SendEmailRequest) {
//! match client.send_email(&request).await {
//!     Ok(response) => println!("sent: {}", response.message),
//!     Err(FreesendError::Validation { message, .. }) => eprintln!("fix the request: {}", message),
//!     Err(FreesendError::Api { status_code: Some(401), .. }) => eprintln!("bad API key"),
//!     Err(e) if e.is_retryable() => eprintln!("try again later: {}", e),
//!     Err(e) => eprintln!("failed: {}", e),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod mocks;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{FreesendClient, FreesendClientBuilder};
pub use config::FreesendConfig;
pub use errors::{FreesendError, FreesendResult};

pub use types::email::{Attachment, SendEmailRequest, SendEmailResponse};
pub use types::payload::{AttachmentPayload, SendEmailPayload};
