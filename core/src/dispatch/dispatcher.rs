//! Producer side of the dispatch layer.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::queue::{Queue, TaskEnvelope};

/// Typed producer handle for one registered task.
///
/// `dispatch` returns as soon as queue admission succeeds or fails; it never
/// reports handler success or failure, since execution is asynchronous.
pub struct Dispatcher<T> {
    queue: Arc<dyn Queue>,
    task_name: String,
    dedup_window: Duration,
    _payload: PhantomData<fn(T)>,
}

impl<T: Serialize> Dispatcher<T> {
    /// Create a producer for `task_name` (the fully qualified name returned
    /// by registration)
    pub fn new(queue: Arc<dyn Queue>, task_name: String, dedup_window: Duration) -> Self {
        Self {
            queue,
            task_name,
            dedup_window,
            _payload: PhantomData,
        }
    }

    /// Submit one execution of the task, requesting immediate delivery.
    ///
    /// Identical payloads dispatched within the dedup window collapse into a
    /// single admitted task.
    pub async fn dispatch(&self, payload: &T) -> DomainResult<()> {
        let payload = serde_json::to_value(payload).map_err(|e| DomainError::Internal {
            message: format!("could not serialize task payload: {e}"),
        })?;
        let dedup_key = dedup_key(&self.task_name, &payload);

        tracing::debug!(
            task_name = %self.task_name,
            dedup_key = %dedup_key,
            "dispatching task"
        );

        let envelope = TaskEnvelope {
            id: Uuid::new_v4(),
            task_name: self.task_name.clone(),
            dedup_key,
            dedup_window: self.dedup_window,
            payload,
            delay: Duration::ZERO,
        };
        self.queue.enqueue(envelope).await?;
        Ok(())
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }
}

/// Deterministic dedup key over the task name and canonical JSON payload.
///
/// `serde_json::Value` keeps object keys sorted, so equal payloads always
/// produce equal keys regardless of field declaration order.
pub(crate) fn dedup_key(task_name: &str, payload: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(task_name.as_bytes());
    hasher.update(b"\x00");
    hasher.update(payload.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
