//! In-process queue implementation.
//!
//! Honors the full queue contract against a shared [`TaskRegistry`]:
//! admission deduplication per key, at-least-once execution on concurrent
//! workers, requested execution delays, exponential-backoff retries,
//! reserved counts, one fallback invocation on exhaustion and cooperative
//! cancellation. Serves tests and
//! single-process deployments; a distributed deployment would put a broker-
//! backed implementation behind the same [`Queue`] trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::errors::{DispatchError, DomainError};

use super::queue::{Queue, TaskEnvelope};
use super::registry::{TaskContext, TaskDefinition, TaskFailure, TaskRegistry};

pub struct MemoryQueue {
    registry: Arc<TaskRegistry>,
    tx: mpsc::UnboundedSender<TaskEnvelope>,
    admitted: Mutex<HashMap<String, Instant>>,
    cancellation: CancellationToken,
}

impl MemoryQueue {
    /// Start the queue consumer and return the producer handle.
    ///
    /// Cancelling `cancellation` stops admission of new work and asks
    /// in-flight handlers to abort cooperatively; it does not forcibly
    /// terminate them.
    pub fn start(registry: Arc<TaskRegistry>, cancellation: CancellationToken) -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let queue = Arc::new(Self {
            registry: Arc::clone(&registry),
            tx,
            admitted: Mutex::new(HashMap::new()),
            cancellation: cancellation.clone(),
        });
        tokio::spawn(consume(registry, rx, cancellation));
        queue
    }

    /// Admission-side deduplication: at most one admitted instance per dedup
    /// key within the envelope's window. Returns false when the key is
    /// suppressed as a duplicate.
    fn admit(&self, envelope: &TaskEnvelope) -> bool {
        let mut admitted = self.admitted.lock().expect("dedup map lock poisoned");
        let now = Instant::now();
        admitted.retain(|_, expires_at| *expires_at > now);

        if admitted.contains_key(&envelope.dedup_key) {
            return false;
        }
        admitted.insert(envelope.dedup_key.clone(), now + envelope.dedup_window);
        true
    }
}

#[async_trait]
impl Queue for MemoryQueue {
    async fn enqueue(&self, envelope: TaskEnvelope) -> Result<(), DispatchError> {
        if self.cancellation.is_cancelled() {
            return Err(DispatchError::QueueUnavailable {
                message: "queue is shutting down".to_string(),
            });
        }
        if !self.registry.contains(&envelope.task_name) {
            return Err(DispatchError::UnknownTask {
                name: envelope.task_name,
            });
        }

        if !self.admit(&envelope) {
            tracing::debug!(
                task_name = %envelope.task_name,
                dedup_key = %envelope.dedup_key,
                "duplicate dispatch suppressed within dedup window"
            );
            return Ok(());
        }

        self.tx
            .send(envelope)
            .map_err(|_| DispatchError::QueueUnavailable {
                message: "queue consumer stopped".to_string(),
            })
    }
}

async fn consume(
    registry: Arc<TaskRegistry>,
    mut rx: mpsc::UnboundedReceiver<TaskEnvelope>,
    cancellation: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancellation.cancelled() => break,
            received = rx.recv() => {
                let Some(envelope) = received else { break };
                let Some(task) = registry.lookup(&envelope.task_name) else {
                    // Admission checks registration, so this only happens if
                    // producer and consumer use different registries.
                    tracing::error!(task_name = %envelope.task_name, "received unregistered task");
                    continue;
                };
                let recovery_hook = registry.config().recovery_hook.clone();
                tokio::spawn(process(task, envelope, recovery_hook, cancellation.clone()));
            }
        }
    }
}

/// Run one admitted task to completion: wait out any requested delay,
/// execute, retry with backoff on handler errors, hand terminal failures to
/// the fallback exactly once.
async fn process(
    task: Arc<TaskDefinition>,
    envelope: TaskEnvelope,
    recovery_hook: Option<Arc<dyn Fn(&str) + Send + Sync>>,
    cancellation: CancellationToken,
) {
    if !envelope.delay.is_zero() {
        tokio::select! {
            _ = cancellation.cancelled() => return,
            _ = tokio::time::sleep(envelope.delay) => {}
        }
    }

    let mut reserved_count: u32 = 0;

    loop {
        reserved_count += 1;
        let ctx = TaskContext {
            reserved_count,
            cancellation: cancellation.clone(),
        };
        let attempt = task.handler.call(ctx, envelope.payload.clone());

        // Handlers run in their own task so a panic is contained and can be
        // converted into a normal handler error.
        let result = match tokio::spawn(attempt).await {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => {
                let message = panic_message(join_error.into_panic());
                if let Some(hook) = &recovery_hook {
                    hook(&message);
                }
                Err(DomainError::Internal {
                    message: format!("handler panicked: {message}"),
                })
            }
            Err(_) => return,
        };

        match result {
            Ok(()) => {
                tracing::debug!(
                    task_name = %task.name,
                    message_id = %envelope.id,
                    reserved_count,
                    "task completed"
                );
                return;
            }
            Err(error) if reserved_count > task.retry.retry_limit => {
                tracing::error!(
                    task_name = %task.name,
                    message_id = %envelope.id,
                    reserved_count,
                    error = %error,
                    "retry limit exhausted, running fallback and discarding message"
                );
                (task.fallback)(&TaskFailure {
                    task_name: &task.name,
                    payload: &envelope.payload,
                    reserved_count,
                    error: &error,
                });
                return;
            }
            Err(error) => {
                let backoff = task.retry.backoff_for(reserved_count);
                tracing::warn!(
                    task_name = %task.name,
                    message_id = %envelope.id,
                    reserved_count,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %error,
                    "task failed, retrying after backoff"
                );
                tokio::select! {
                    _ = cancellation.cancelled() => return,
                    _ = tokio::time::sleep(backoff) => {}
                }
            }
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
