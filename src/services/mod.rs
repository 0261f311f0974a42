//! Service implementations for the Freesend API.

mod email;

pub use email::{interpret_response, EmailService};
