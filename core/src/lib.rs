//! # Vouch Core
//!
//! Core domain layer for the Vouch service: scoped email-verification tokens
//! (signup confirmation, authenticated email change) and the deduplicating,
//! retrying dispatch layer that delivers the notifications carrying them.
//! External collaborators (account storage, email transport, error reporting,
//! the task queue) are expressed as traits and implemented elsewhere.

pub mod dispatch;
pub mod domain;
pub mod emailing;
pub mod errors;
pub mod reporting;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use dispatch::{DispatchConfig, Dispatcher, MemoryQueue, Queue, RetryPolicy, TaskRegistry};
pub use domain::entities::claims::{TokenScope, VerificationClaims};
pub use errors::{DispatchError, DomainError, DomainResult, TokenError};
pub use repositories::{MockUserStore, UserAccount, UserStore};
pub use services::{
    EmailChangeService, NotificationConfig, SignupService, TokenServiceConfig,
    VerificationTokenService,
};
