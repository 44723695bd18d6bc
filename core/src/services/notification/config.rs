//! Configuration for the notification flows

/// Transactional template identifiers, one per outbound email kind
#[derive(Debug, Clone)]
pub struct TemplateIds {
    /// Signup confirmation carrying a signup token
    pub signup: String,
    /// Notice sent instead of a signup token when the address already has
    /// an account
    pub already_registered: String,
    /// Email-change verification carrying an account-bound token
    pub email_change: String,
}

/// Configuration for the notification flows
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Sender address on every outbound message
    pub from_address: String,
    /// Template ids per message kind
    pub templates: TemplateIds,
    /// Front-end base URL the deep links point into
    pub front_base_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            from_address: "no-reply@localhost".to_string(),
            templates: TemplateIds {
                signup: "signup".to_string(),
                already_registered: "already-registered".to_string(),
                email_change: "email-change".to_string(),
            },
            front_base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl NotificationConfig {
    /// Deep link completing a signup with the embedded token
    pub fn complete_signup_url(&self, token: &str) -> String {
        format!(
            "{}/signup/complete?token={}",
            self.front_base_url.trim_end_matches('/'),
            token
        )
    }

    /// Deep link verifying an email change with the embedded token
    pub fn verify_email_url(&self, token: &str) -> String {
        format!(
            "{}/email/verify?token={}",
            self.front_base_url.trim_end_matches('/'),
            token
        )
    }
}
