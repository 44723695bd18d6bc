//! Email sending boundary.
//!
//! Messages are addressed by transactional template id and carry a flat map
//! of dynamic template fields. The concrete transport (structured log,
//! SendGrid) lives in the infrastructure layer behind [`EmailSender`].

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::DomainError;

/// Template field carrying the raw token string
pub const TOKEN_FIELD: &str = "token";

/// Template field carrying the pre-built deep link embedding the token
pub const TOKEN_LINK_FIELD: &str = "token_link";

/// A rendered, template-addressed outbound email
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    /// Transactional template identifier
    pub template_id: String,

    /// Recipient address
    pub to: String,

    /// Sender address
    pub from: String,

    /// Dynamic template fields (token, deep link, display values)
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl EmailMessage {
    /// Start a message for the given template and addresses
    pub fn templated(
        template_id: impl Into<String>,
        to: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            to: to.into(),
            from: from.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a dynamic template field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Read back a field, if present
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// Delivers a rendered message
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_fields() {
        let message = EmailMessage::templated("d-signup", "a@x.io", "no-reply@vouch.io")
            .with_field(TOKEN_FIELD, "abc.def.ghi")
            .with_field(TOKEN_LINK_FIELD, "https://app.example.com/signup?token=abc.def.ghi");

        assert_eq!(message.template_id, "d-signup");
        assert_eq!(message.field(TOKEN_FIELD).unwrap(), "abc.def.ghi");
        assert!(message.field("missing").is_none());
    }
}
