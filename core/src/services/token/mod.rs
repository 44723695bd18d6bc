//! Verification token service
//!
//! Mints and validates the scoped, signed, expiring tokens embedded in
//! account-email notifications. One symmetric key covers both flows; the
//! scope claim alone keeps a token from crossing into the other flow's
//! validator.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::VerificationTokenService;
