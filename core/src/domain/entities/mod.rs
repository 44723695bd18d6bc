//! Business entities for the verification domain.

pub mod claims;
pub mod user;

pub use claims::{TokenScope, VerificationClaims};
pub use user::UserAccount;
