//! Abstract task queue boundary.

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::DispatchError;

/// A task instance submitted for asynchronous execution
#[derive(Debug, Clone)]
pub struct TaskEnvelope {
    /// Unique id of this submission, for log correlation
    pub id: Uuid,

    /// Fully qualified (namespaced) task name
    pub task_name: String,

    /// Deterministic function of task name and payload; the queue admits at
    /// most one instance per key within `dedup_window`
    pub dedup_key: String,

    /// Admission deduplication window for this key
    pub dedup_window: Duration,

    /// Typed task arguments, serialized
    pub payload: serde_json::Value,

    /// Delay before the first execution attempt; [`Dispatcher`] always asks
    /// for immediate execution
    ///
    /// [`Dispatcher`]: super::Dispatcher
    pub delay: Duration,
}

/// At-least-once delivery queue with per-key admission deduplication.
///
/// `enqueue` reports admission failures only; handler success or failure is
/// invisible here because execution happens later, on a worker.
#[async_trait]
pub trait Queue: Send + Sync {
    async fn enqueue(&self, envelope: TaskEnvelope) -> Result<(), DispatchError>;
}
