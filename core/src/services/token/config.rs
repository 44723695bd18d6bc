//! Configuration for the verification token service

use chrono::Duration;

use crate::domain::entities::claims::TokenScope;

/// Configuration for the verification token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric HMAC signing key, held only by this service
    pub signing_key: Vec<u8>,
    /// Canonical service URL, used as both issuer and audience
    pub service_url: String,
    /// Time to live for signup confirmation tokens
    pub signup_ttl: Duration,
    /// Time to live for email-change verification tokens
    pub email_change_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            signing_key: b"development-secret-please-change-in-production".to_vec(),
            service_url: "http://localhost:8080".to_string(),
            signup_ttl: Duration::hours(1),
            email_change_ttl: Duration::minutes(30),
        }
    }
}

impl TokenServiceConfig {
    /// Flow-specific token TTL
    pub fn ttl(&self, scope: TokenScope) -> Duration {
        match scope {
            TokenScope::Signup => self.signup_ttl,
            TokenScope::EmailChange => self.email_change_ttl,
        }
    }
}
