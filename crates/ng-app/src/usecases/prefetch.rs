//! Concurrent prefetch coordinator.
//!
//! Fans a fixed set of independent operations out onto the runtime and waits
//! for every one of them to settle. A failing, panicking or timed-out task
//! never aborts its siblings; it settles into a fallback instead.

use std::future::Future;
use std::time::Duration;

use futures::future::{join_all, BoxFuture};
use tracing::{debug, info, info_span, warn, Instrument};

use ng_core::ports::CollaboratorError;
use ng_core::{PrefetchBatch, PrefetchEntry, PrefetchErrorKind, PrefetchGeneration, PrefetchTaskResult};

/// Descriptor of one prefetch operation.
pub struct PrefetchTask<T> {
    name: String,
    operation: BoxFuture<'static, anyhow::Result<T>>,
    fallback: T,
}

impl<T> PrefetchTask<T> {
    pub fn new<F>(name: impl Into<String>, fallback: T, operation: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self {
            name: name.into(),
            operation: Box::pin(operation),
            fallback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

enum TaskFailure {
    Failed(anyhow::Error),
    TimedOut(Duration),
}

/// Runs prefetch batches with a wait-for-all, never-fail-fast policy.
#[derive(Debug, Clone, Default)]
pub struct PrefetchCoordinator {
    task_timeout: Option<Duration>,
}

impl PrefetchCoordinator {
    /// Create a coordinator. `task_timeout` of `None` lets a task run until it settles.
    pub fn new(task_timeout: Option<Duration>) -> Self {
        Self { task_timeout }
    }

    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout
    }

    /// Run every task concurrently and return once all of them settled.
    ///
    /// The returned batch lists outcomes in submission order and is tagged
    /// with `generation`.
    pub async fn run<T>(
        &self,
        generation: PrefetchGeneration,
        tasks: Vec<PrefetchTask<T>>,
    ) -> PrefetchBatch<T>
    where
        T: Send + 'static,
    {
        let span = info_span!(
            "usecase.prefetch_coordinator.run",
            generation = %generation,
            tasks = tasks.len()
        );

        async move {
            let mut names = Vec::with_capacity(tasks.len());
            let mut fallbacks = Vec::with_capacity(tasks.len());
            let mut handles = Vec::with_capacity(tasks.len());

            for task in tasks {
                let PrefetchTask {
                    name,
                    operation,
                    fallback,
                } = task;
                let timeout = self.task_timeout;
                let task_span = info_span!("usecase.prefetch_coordinator.task", task = %name);

                handles.push(tokio::spawn(
                    async move {
                        match timeout {
                            Some(limit) => match tokio::time::timeout(limit, operation).await {
                                Ok(result) => result.map_err(TaskFailure::Failed),
                                Err(_) => Err(TaskFailure::TimedOut(limit)),
                            },
                            None => operation.await.map_err(TaskFailure::Failed),
                        }
                    }
                    .instrument(task_span),
                ));
                names.push(name);
                fallbacks.push(fallback);
            }

            let settled = join_all(handles).await;

            let entries: Vec<PrefetchEntry<T>> = names
                .into_iter()
                .zip(fallbacks)
                .zip(settled)
                .map(|((name, fallback), joined)| {
                    let result = match joined {
                        Ok(Ok(value)) => {
                            debug!(task = %name, "prefetch task succeeded");
                            PrefetchTaskResult::success(value)
                        }
                        Ok(Err(TaskFailure::Failed(err))) => {
                            let kind = CollaboratorError::classify(&err);
                            warn!(task = %name, kind = %kind, error = %err, "prefetch task failed, using fallback");
                            PrefetchTaskResult::failure(kind, fallback)
                        }
                        Ok(Err(TaskFailure::TimedOut(limit))) => {
                            warn!(task = %name, timeout_ms = limit.as_millis() as u64, "prefetch task timed out, using fallback");
                            PrefetchTaskResult::failure(PrefetchErrorKind::TimedOut, fallback)
                        }
                        Err(join_err) => {
                            warn!(task = %name, error = %join_err, "prefetch task aborted, using fallback");
                            PrefetchTaskResult::failure(PrefetchErrorKind::Aborted, fallback)
                        }
                    };
                    PrefetchEntry { name, result }
                })
                .collect();

            let batch = PrefetchBatch::new(generation, entries);
            info!(
                settled = batch.len(),
                failed = batch.failures().len(),
                "prefetch batch settled"
            );
            batch
        }
        .instrument(span)
        .await
    }
}
