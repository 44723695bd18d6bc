//! Terminal-failure reporting boundary.

use crate::errors::DomainError;

/// Fire-and-forget sink for errors that have exhausted every retry.
///
/// Only the dispatch fallback calls this; by then the original request path
/// has long since returned, so there is no caller left to notify.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &DomainError);
}

/// Reporter that drops everything, for wiring where no sink is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn report(&self, _error: &DomainError) {}
}
