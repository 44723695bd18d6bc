//! Configuration for the dispatch layer

use std::sync::Arc;
use std::time::Duration;

/// Retry behavior for a registered task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of failed attempts after which the message fails permanently
    /// and the fallback runs
    pub retry_limit: u32,
    /// Minimum backoff time between retries
    pub min_backoff: Duration,
    /// Maximum backoff time between retries
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_limit: 64,
            min_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(60 * 60),
        }
    }
}

impl RetryPolicy {
    /// Backoff before the next attempt, doubling from `min_backoff` and
    /// capped at `max_backoff`. `failed_attempts` is at least 1.
    pub fn backoff_for(&self, failed_attempts: u32) -> Duration {
        let doublings = failed_attempts.saturating_sub(1).min(32);
        let backoff = self
            .min_backoff
            .saturating_mul(2u32.saturating_pow(doublings));
        backoff.min(self.max_backoff)
    }
}

/// Hook observing a handler panic before it is converted into a normal
/// handler error and re-enters the retry machinery
pub type RecoveryHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Process-wide dispatch configuration
#[derive(Clone)]
pub struct DispatchConfig {
    /// Prefix applied to every task name to avoid cross-deployment
    /// collisions in a shared queue
    pub namespace: String,
    /// Repeated dispatches with an identical dedup key collapse into a
    /// single admitted task within this window
    pub dedup_window: Duration,
    /// Default retry policy for registered tasks
    pub retry: RetryPolicy,
    /// Optional panic observer for handler executions
    pub recovery_hook: Option<RecoveryHook>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self {
            namespace: String::new(),
            dedup_window: Duration::from_secs(60),
            retry: RetryPolicy::default(),
            recovery_hook: None,
        }
    }

    /// Fully qualified task name under this configuration's namespace
    pub fn task_name(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}:{}", self.namespace, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_queue_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retry_limit, 64);
        assert_eq!(policy.min_backoff, Duration::from_secs(5));
        assert_eq!(policy.max_backoff, Duration::from_secs(3600));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            retry_limit: 8,
            min_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(40),
        };
        assert_eq!(policy.backoff_for(1), Duration::from_secs(5));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(10));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(20));
        assert_eq!(policy.backoff_for(4), Duration::from_secs(40));
        assert_eq!(policy.backoff_for(5), Duration::from_secs(40));
        assert_eq!(policy.backoff_for(64), Duration::from_secs(40));
    }

    #[test]
    fn namespace_prefixes_task_names() {
        let mut config = DispatchConfig::new();
        assert_eq!(config.task_name("signup_email"), "signup_email");

        config.namespace = "vouch".to_string();
        assert_eq!(config.task_name("signup_email"), "vouch:signup_email");
    }
}
