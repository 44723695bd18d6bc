//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{DispatchError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Email transport error: {message}")]
    EmailTransport { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type DomainResult<T> = Result<T, DomainError>;
