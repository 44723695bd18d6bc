//! Error reporting sinks

use vouch_core::errors::DomainError;
use vouch_core::reporting::ErrorReporter;

/// Reporter that writes terminal failures to the structured log.
///
/// Deployments with an external error tracker put their own implementation
/// behind [`ErrorReporter`] instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorReporter for LogReporter {
    fn report(&self, error: &DomainError) {
        tracing::error!(error = %error, "terminal task failure reported");
    }
}
