//! Main verification token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::claims::{TokenScope, VerificationClaims};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service that both mints and verifies its own verification tokens
pub struct VerificationTokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl VerificationTokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(&config.signing_key);
        let decoding_key = DecodingKey::from_secret(&config.signing_key);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.service_url]);
        validation.set_audience(&[&config.service_url]);
        validation.validate_exp = true;
        // No clock slack: a token is unusable from the moment it expires.
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Mints a signed token for one flow
    ///
    /// # Arguments
    ///
    /// * `scope` - The flow the token belongs to; also selects the TTL
    /// * `email` - The address the token attests to
    /// * `account_id` - Bound account, required by the email-change flow
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact signed token
    /// * `Err(TokenError::GenerationFailed)` - Signing failed; a
    ///   configuration-level fault, not a user-facing outcome
    pub fn mint(
        &self,
        scope: TokenScope,
        email: &str,
        account_id: Option<i64>,
    ) -> DomainResult<String> {
        let mut claims = VerificationClaims::new(
            scope,
            email,
            &self.config.service_url,
            self.config.ttl(scope),
        );
        if let Some(account_id) = account_id {
            claims = claims.with_account_id(account_id);
        }
        self.encode_claims(&claims)
    }

    /// Encodes prepared claims into a compact signed token
    pub(crate) fn encode_claims(&self, claims: &VerificationClaims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Validates a presented token against one flow's expectations
    ///
    /// Verifies the signature, expiry, issuer and audience, then the scope.
    /// Signature validity alone is necessary but not sufficient: a mismatch
    /// on any check yields the same `InvalidOrExpired` outcome, so a caller
    /// cannot distinguish which check rejected the token.
    pub fn validate(
        &self,
        token: &str,
        expected_scope: TokenScope,
    ) -> DomainResult<VerificationClaims> {
        let data = decode::<VerificationClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| DomainError::Token(TokenError::InvalidOrExpired))?;

        if data.claims.scope != expected_scope {
            return Err(DomainError::Token(TokenError::InvalidOrExpired));
        }
        Ok(data.claims)
    }
}
