//! Verification token claims.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator restricting a token to exactly one flow's validator.
///
/// The tag round-trips through the signed claims, so a token minted for one
/// flow can never be replayed into another flow even though both flows share
/// the same signing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenScope {
    Signup,
    EmailChange,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::Signup => "signup",
            TokenScope::EmailChange => "email-change",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for the signed verification token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationClaims {
    /// Which flow minted the token; fixed per flow, never user-supplied
    pub scope: TokenScope,

    /// Subject: the email address the token attests to
    pub sub: String,

    /// Binds an email-change token to one existing account so it cannot
    /// be replayed against another account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,

    /// Issuer: the service's own canonical URL
    pub iss: String,

    /// Audience: same canonical URL; a token is only valid where it was minted
    pub aud: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl VerificationClaims {
    /// Creates new claims for a verification token
    ///
    /// # Arguments
    ///
    /// * `scope` - The flow the token belongs to
    /// * `email` - The email address being attested
    /// * `service_url` - Canonical URL used as both issuer and audience
    /// * `ttl` - Flow-specific time to live
    pub fn new(scope: TokenScope, email: &str, service_url: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            scope,
            sub: email.to_string(),
            account_id: None,
            iss: service_url.to_string(),
            aud: service_url.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Binds the claims to a specific account (email-change flow)
    pub fn with_account_id(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_serializes_to_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TokenScope::Signup).unwrap(),
            "\"signup\""
        );
        assert_eq!(
            serde_json::to_string(&TokenScope::EmailChange).unwrap(),
            "\"email-change\""
        );
    }

    #[test]
    fn new_claims_expire_after_issuance() {
        let claims = VerificationClaims::new(
            TokenScope::Signup,
            "a@x.io",
            "https://vouch.example.com",
            Duration::hours(1),
        );
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.iss, claims.aud);
        assert!(!claims.is_expired());
        assert_eq!(claims.account_id, None);
    }

    #[test]
    fn account_id_is_omitted_from_payload_when_absent() {
        let claims = VerificationClaims::new(
            TokenScope::Signup,
            "a@x.io",
            "https://vouch.example.com",
            Duration::hours(1),
        );
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("account_id"));

        let bound = claims.with_account_id(42);
        let json = serde_json::to_string(&bound).unwrap();
        assert!(json.contains("\"account_id\":42"));
    }
}
