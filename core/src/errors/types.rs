//! Token and dispatch error types.

use thiserror::Error;

/// Verification token errors.
///
/// Validation deliberately collapses every failure mode (bad signature,
/// expiry, wrong scope, wrong issuer or audience) into the single
/// `InvalidOrExpired` outcome so that callers learn nothing about which
/// check rejected the token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid or expired token")]
    InvalidOrExpired,

    #[error("could not generate verification token")]
    GenerationFailed,
}

/// Errors raised by the task dispatch layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Registering the same task name twice is a programming error.
    #[error("task '{name}' is already registered")]
    DuplicateTask { name: String },

    #[error("no task registered under '{name}'")]
    UnknownTask { name: String },

    #[error("queue admission failed: {message}")]
    QueueUnavailable { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_error_messages_are_uniform() {
        assert_eq!(
            TokenError::InvalidOrExpired.to_string(),
            "invalid or expired token"
        );
    }

    #[test]
    fn dispatch_error_names_the_task() {
        let error = DispatchError::DuplicateTask {
            name: "vouch:signup_email".to_string(),
        };
        assert!(error.to_string().contains("vouch:signup_email"));
    }
}
