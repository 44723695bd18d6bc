//! Deduplicating, retrying task dispatch.
//!
//! This module turns a synchronous "please eventually run this side-effecting
//! handler" request into a deduplicated, retried, asynchronous execution:
//!
//! - [`TaskRegistry`] maps task names to typed handlers, retry policies and
//!   fallback handlers. It is an explicit object constructed once at startup,
//!   so independent registries can coexist in one process.
//! - [`Dispatcher`] computes a deterministic dedup key from the task name and
//!   payload and submits to a [`Queue`] for immediate execution.
//! - [`MemoryQueue`] is the in-process queue implementation: admission
//!   deduplication per key within a window, concurrent workers, exponential
//!   backoff retries up to the retry limit, one fallback invocation on
//!   exhaustion, and cooperative cancellation.
//!
//! Ordering is only constrained per dedup key (at most one admitted instance
//! outstanding per window); unrelated tasks run concurrently and may complete
//! out of submission order.

mod config;
mod dispatcher;
mod memory;
mod queue;
mod registry;

#[cfg(test)]
mod tests;

pub use config::{DispatchConfig, RetryPolicy};
pub use dispatcher::Dispatcher;
pub use memory::MemoryQueue;
pub use queue::{Queue, TaskEnvelope};
pub use registry::{TaskContext, TaskFailure, TaskRegistry};
