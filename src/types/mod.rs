//! Type definitions for the Freesend API.
//!
//! `email` holds the caller-facing request and response values; `payload`
//! holds the exact JSON shape sent to the service.

pub mod email;
pub mod payload;
