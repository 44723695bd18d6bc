//! SendGrid email transport
//!
//! Posts template-addressed messages to the SendGrid v3 mail-send API with
//! the message fields as dynamic template data.

use async_trait::async_trait;
use std::time::Duration;

use vouch_core::emailing::{EmailMessage, EmailSender};
use vouch_core::errors::{DomainError, DomainResult};

use crate::InfrastructureError;

const DEFAULT_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid transport configuration
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// API key bearing mail-send permission
    pub api_key: String,
    /// Mail-send endpoint; overridable for tests
    pub endpoint: String,
    /// Timeout for API requests
    pub request_timeout: Duration,
}

impl SendGridConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, InfrastructureError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "SendGrid API key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
        })
    }
}

/// SendGrid-backed email sender
pub struct SendGridSender {
    client: reqwest::Client,
    config: SendGridConfig,
}

impl SendGridSender {
    pub fn new(config: SendGridConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                InfrastructureError::Config(format!("could not build HTTP client: {e}"))
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl EmailSender for SendGridSender {
    async fn send(&self, message: &EmailMessage) -> DomainResult<()> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request_body(message))
            .send()
            .await
            .map_err(|e| DomainError::EmailTransport {
                message: format!("SendGrid request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::EmailTransport {
                message: format!("SendGrid responded with failure status: {status}"),
            });
        }
        Ok(())
    }
}

/// v3 mail-send request body for one templated personalization
fn request_body(message: &EmailMessage) -> serde_json::Value {
    serde_json::json!({
        "from": { "email": message.from },
        "template_id": message.template_id,
        "personalizations": [{
            "to": [{ "email": message.to }],
            "dynamic_template_data": message.fields,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_template_and_fields() {
        let message = EmailMessage::templated("signup", "a@x.io", "no-reply@vouch.io")
            .with_field("token", "abc.def.ghi")
            .with_field("token_link", "https://app.example.com/signup/complete?token=abc.def.ghi");

        let body = request_body(&message);
        assert_eq!(body["template_id"], "signup");
        assert_eq!(body["from"]["email"], "no-reply@vouch.io");
        assert_eq!(body["personalizations"][0]["to"][0]["email"], "a@x.io");
        assert_eq!(
            body["personalizations"][0]["dynamic_template_data"]["token"],
            "abc.def.ghi"
        );
    }

    #[test]
    fn empty_api_key_is_a_configuration_error() {
        assert!(SendGridConfig::new("").is_err());
    }
}
