//! Task registry: names mapped to typed handlers, retry policies and
//! fallback handlers.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::{Arc, RwLock};
use tokio_util::sync::CancellationToken;

use crate::errors::{DispatchError, DomainError, DomainResult};
use crate::reporting::{ErrorReporter, NoopReporter};

use super::config::{DispatchConfig, RetryPolicy};

/// Per-attempt execution context handed to task handlers
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Number of delivery attempts so far, this one included
    pub reserved_count: u32,

    /// Advisory shutdown signal; handlers observe it at their own I/O
    /// boundaries
    pub cancellation: CancellationToken,
}

/// Terminal failure handed to a fallback handler after retry exhaustion
#[derive(Debug)]
pub struct TaskFailure<'a> {
    pub task_name: &'a str,
    pub payload: &'a serde_json::Value,
    pub reserved_count: u32,
    pub error: &'a DomainError,
}

pub(crate) type FallbackHandler = Arc<dyn Fn(&TaskFailure<'_>) + Send + Sync>;

type BoxedHandlerFuture = Pin<Box<dyn Future<Output = DomainResult<()>> + Send>>;

/// Object-safe view of a typed task handler
pub(crate) trait ErasedHandler: Send + Sync {
    fn call(&self, ctx: TaskContext, payload: serde_json::Value) -> BoxedHandlerFuture;
}

struct TypedHandler<T, F> {
    handler: F,
    _payload: PhantomData<fn(T)>,
}

impl<T, F, Fut> ErasedHandler for TypedHandler<T, F>
where
    T: DeserializeOwned + Send + 'static,
    F: Fn(TaskContext, T) -> Fut + Send + Sync,
    Fut: Future<Output = DomainResult<()>> + Send + 'static,
{
    fn call(&self, ctx: TaskContext, payload: serde_json::Value) -> BoxedHandlerFuture {
        match serde_json::from_value::<T>(payload) {
            Ok(args) => Box::pin((self.handler)(ctx, args)),
            Err(e) => {
                // A payload the handler cannot decode never becomes runnable;
                // surfacing it as a handler error routes it to the fallback.
                let message = format!("could not decode task payload: {e}");
                Box::pin(async move { Err(DomainError::Internal { message }) })
            }
        }
    }
}

pub(crate) struct TaskDefinition {
    pub(crate) name: String,
    pub(crate) retry: RetryPolicy,
    pub(crate) handler: Arc<dyn ErasedHandler>,
    pub(crate) fallback: FallbackHandler,
}

/// Registry of runnable tasks, constructed once at startup and shared with
/// the queue consumer. Registration is one-time per task name.
pub struct TaskRegistry {
    config: DispatchConfig,
    reporter: Arc<dyn ErrorReporter>,
    tasks: RwLock<HashMap<String, Arc<TaskDefinition>>>,
}

impl TaskRegistry {
    pub fn new(config: DispatchConfig, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            config,
            reporter,
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// Registry with no terminal-failure sink configured; exhausted tasks
    /// are logged by the queue but reported nowhere else
    pub fn without_reporting(config: DispatchConfig) -> Self {
        Self::new(config, Arc::new(NoopReporter))
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Register a typed handler under `name`, reporting terminal failures
    /// through the registry's error reporter.
    ///
    /// Returns the fully qualified task name to dispatch under. Registering
    /// the same name twice is a programming error and fails with
    /// [`DispatchError::DuplicateTask`].
    pub fn register<T, F, Fut>(
        &self,
        name: &str,
        retry: RetryPolicy,
        handler: F,
    ) -> DomainResult<String>
    where
        T: DeserializeOwned + Send + 'static,
        F: Fn(TaskContext, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DomainResult<()>> + Send + 'static,
    {
        let reporter = Arc::clone(&self.reporter);
        let fallback: FallbackHandler = Arc::new(move |failure: &TaskFailure<'_>| {
            let error = DomainError::Internal {
                message: format!(
                    "worker failed to process '{}'({}) after {} attempts: {}",
                    failure.task_name, failure.payload, failure.reserved_count, failure.error
                ),
            };
            reporter.report(&error);
        });
        self.register_with_fallback(name, retry, handler, fallback)
    }

    /// Register a typed handler with an explicit fallback handler
    pub(crate) fn register_with_fallback<T, F, Fut>(
        &self,
        name: &str,
        retry: RetryPolicy,
        handler: F,
        fallback: FallbackHandler,
    ) -> DomainResult<String>
    where
        T: DeserializeOwned + Send + 'static,
        F: Fn(TaskContext, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DomainResult<()>> + Send + 'static,
    {
        let task_name = self.config.task_name(name);
        let definition = Arc::new(TaskDefinition {
            name: task_name.clone(),
            retry,
            handler: Arc::new(TypedHandler {
                handler,
                _payload: PhantomData::<fn(T)>,
            }),
            fallback,
        });

        let mut tasks = self.tasks.write().expect("task registry lock poisoned");
        if tasks.contains_key(&task_name) {
            return Err(DispatchError::DuplicateTask { name: task_name }.into());
        }
        tasks.insert(task_name.clone(), definition);
        Ok(task_name)
    }

    pub(crate) fn lookup(&self, task_name: &str) -> Option<Arc<TaskDefinition>> {
        let tasks = self.tasks.read().expect("task registry lock poisoned");
        tasks.get(task_name).cloned()
    }

    /// Whether a task is registered under the fully qualified name
    pub fn contains(&self, task_name: &str) -> bool {
        self.lookup(task_name).is_some()
    }
}
