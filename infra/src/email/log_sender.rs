//! Log-backed email sender for development and local runs

use async_trait::async_trait;

use vouch_core::emailing::{EmailMessage, EmailSender};
use vouch_core::errors::DomainResult;

/// Sender that writes each message to the structured log instead of
/// delivering it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEmailSender;

impl LogEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> DomainResult<()> {
        tracing::info!(
            template_id = %message.template_id,
            to = %message.to,
            from = %message.from,
            fields = %serde_json::to_string(&message.fields).unwrap_or_default(),
            "Sending email..."
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_a_message_always_succeeds() {
        let sender = LogEmailSender::new();
        let message = EmailMessage::templated("signup", "a@x.io", "no-reply@vouch.io")
            .with_field("token", "abc.def.ghi");
        assert!(sender.send(&message).await.is_ok());
    }
}
