//! # Vouch Infrastructure
//!
//! Concrete implementations of the external collaborators `vouch_core`
//! specifies at its interface boundary: email transports (structured-log and
//! SendGrid) and the error reporting sink.

pub mod email;
pub mod reporting;

use thiserror::Error;

/// Infrastructure-level errors raised while constructing collaborators
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),
}

// Re-export commonly used types
pub use email::{build_sender, LogEmailSender, SendGridConfig, SendGridSender, SenderKind};
pub use reporting::LogReporter;
