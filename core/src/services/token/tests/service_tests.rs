//! Unit tests for the verification token service

use chrono::{Duration, Utc};

use crate::domain::entities::claims::{TokenScope, VerificationClaims};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenServiceConfig, VerificationTokenService};

const SERVICE_URL: &str = "https://vouch.example.com";

fn service_with_key(key: &[u8]) -> VerificationTokenService {
    VerificationTokenService::new(TokenServiceConfig {
        signing_key: key.to_vec(),
        service_url: SERVICE_URL.to_string(),
        signup_ttl: Duration::hours(1),
        email_change_ttl: Duration::minutes(30),
    })
}

fn service() -> VerificationTokenService {
    service_with_key(b"test-signing-key")
}

fn assert_invalid(result: Result<VerificationClaims, DomainError>) {
    match result {
        Err(DomainError::Token(TokenError::InvalidOrExpired)) => {}
        other => panic!("expected invalid-or-expired, got {other:?}"),
    }
}

#[test]
fn mint_and_validate_signup_token() {
    let service = service();
    let token = service.mint(TokenScope::Signup, "a@x.io", None).unwrap();

    let claims = service.validate(&token, TokenScope::Signup).unwrap();
    assert_eq!(claims.sub, "a@x.io");
    assert_eq!(claims.scope, TokenScope::Signup);
    assert_eq!(claims.account_id, None);
    assert_eq!(claims.iss, SERVICE_URL);
    assert_eq!(claims.aud, SERVICE_URL);
}

#[test]
fn email_change_token_carries_bound_account() {
    let service = service();
    let token = service
        .mint(TokenScope::EmailChange, "new@x.io", Some(42))
        .unwrap();

    let claims = service.validate(&token, TokenScope::EmailChange).unwrap();
    assert_eq!(claims.account_id, Some(42));
    assert_eq!(claims.sub, "new@x.io");
}

#[test]
fn token_scope_must_match_validator() {
    let service = service();

    let signup = service.mint(TokenScope::Signup, "a@x.io", None).unwrap();
    assert_invalid(service.validate(&signup, TokenScope::EmailChange));

    let change = service
        .mint(TokenScope::EmailChange, "a@x.io", Some(1))
        .unwrap();
    assert_invalid(service.validate(&change, TokenScope::Signup));
}

#[test]
fn token_signed_with_other_key_is_rejected() {
    let minter = service_with_key(b"key-one");
    let validator = service_with_key(b"key-two");

    let token = minter.mint(TokenScope::Signup, "a@x.io", None).unwrap();
    assert_invalid(validator.validate(&token, TokenScope::Signup));
}

#[test]
fn issuer_and_audience_must_match_the_validating_service() {
    let minter = VerificationTokenService::new(TokenServiceConfig {
        signing_key: b"shared-key".to_vec(),
        service_url: "https://other-deployment.example.com".to_string(),
        ..TokenServiceConfig::default()
    });
    let validator = VerificationTokenService::new(TokenServiceConfig {
        signing_key: b"shared-key".to_vec(),
        service_url: SERVICE_URL.to_string(),
        ..TokenServiceConfig::default()
    });

    // Same key, same scope, different deployment identity.
    let token = minter.mint(TokenScope::Signup, "a@x.io", None).unwrap();
    assert_invalid(validator.validate(&token, TokenScope::Signup));
}

#[test]
fn validation_respects_the_expiry_boundary() {
    let service = service();
    let now = Utc::now().timestamp();

    // Expires one second from now: still valid.
    let mut claims =
        VerificationClaims::new(TokenScope::Signup, "a@x.io", SERVICE_URL, Duration::hours(1));
    claims.iat = now - 3599;
    claims.exp = now + 1;
    let token = service.encode_claims(&claims).unwrap();
    assert!(service.validate(&token, TokenScope::Signup).is_ok());

    // Expired one second ago: rejected, with zero leeway.
    claims.exp = now - 1;
    let token = service.encode_claims(&claims).unwrap();
    assert_invalid(service.validate(&token, TokenScope::Signup));
}

#[test]
fn garbage_and_tampered_tokens_are_rejected() {
    let service = service();
    assert_invalid(service.validate("not-a-token", TokenScope::Signup));
    assert_invalid(service.validate("", TokenScope::Signup));

    let token = service.mint(TokenScope::Signup, "a@x.io", None).unwrap();
    let mut tampered = token.clone();
    tampered.pop();
    assert_invalid(service.validate(&tampered, TokenScope::Signup));
}
