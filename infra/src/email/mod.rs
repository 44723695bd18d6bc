//! Email transport implementations

mod log_sender;
mod sendgrid;

pub use log_sender::LogEmailSender;
pub use sendgrid::{SendGridConfig, SendGridSender};

use std::sync::Arc;

use vouch_core::emailing::EmailSender;

use crate::InfrastructureError;

/// Known kinds of email transport, selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderKind {
    /// Log every message instead of delivering it (development, tests)
    Log,
    /// Deliver through the SendGrid v3 mail-send API
    SendGrid,
}

/// Instantiate an email sender for a known transport kind.
///
/// `credentials` is the API key for [`SenderKind::SendGrid`] and unused for
/// [`SenderKind::Log`].
pub fn build_sender(
    kind: SenderKind,
    credentials: &str,
) -> Result<Arc<dyn EmailSender>, InfrastructureError> {
    match kind {
        SenderKind::Log => Ok(Arc::new(LogEmailSender::new())),
        SenderKind::SendGrid => {
            let sender = SendGridSender::new(SendGridConfig::new(credentials)?)?;
            Ok(Arc::new(sender))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_kind_needs_no_credentials() {
        assert!(build_sender(SenderKind::Log, "").is_ok());
    }

    #[test]
    fn sendgrid_kind_requires_an_api_key() {
        assert!(matches!(
            build_sender(SenderKind::SendGrid, ""),
            Err(InfrastructureError::Config(_))
        ));
        assert!(build_sender(SenderKind::SendGrid, "SG.test-key").is_ok());
    }
}
