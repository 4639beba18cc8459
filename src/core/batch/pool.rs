//! Bounded worker pool
//!
//! A fixed number of permits is shared by every job in the process. A unit is
//! only spawned once it holds a permit, so excess work waits in the submitting
//! loop instead of fanning out unbounded parallelism. Both entry points are
//! join-all barriers: they return after every submitted unit has finished.

use super::types::{JobReport, UnitFailure, WorkUnit};
use crate::config::EngineConfig;
use crate::utils::error::{EngineError, Result};
use crate::utils::format_duration;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

/// Fixed-size pool of worker slots
#[derive(Debug, Clone)]
pub struct WorkerPool {
    size: usize,
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    /// Create a pool with `size` slots (at least one)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            permits: Arc::new(Semaphore::new(size)),
        }
    }

    /// Create a pool sized from configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.pool_size())
    }

    /// Number of slots
    pub fn size(&self) -> usize {
        self.size
    }

    /// Slots not currently running a unit
    pub fn idle_workers(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run a blocking operation for every unit on the blocking thread pool.
    ///
    /// A unit that returns an error or panics is logged and recorded in the
    /// report; its siblings keep running.
    pub async fn run_blocking<U, R, F>(
        &self,
        job: &str,
        units: impl IntoIterator<Item = U>,
        operation: F,
    ) -> JobReport<R>
    where
        U: WorkUnit,
        R: Send + 'static,
        F: Fn(U) -> Result<R> + Send + Sync + 'static,
    {
        let operation = Arc::new(operation);
        self.dispatch(job, units, move |unit| {
            let operation = Arc::clone(&operation);
            async move {
                match tokio::task::spawn_blocking(move || operation(unit)).await {
                    Ok(result) => result,
                    Err(e) => Err(EngineError::worker(format!("worker panicked: {}", e))),
                }
            }
        })
        .await
    }

    /// Run an async operation for every unit.
    pub async fn run_async<U, R, F, Fut>(
        &self,
        job: &str,
        units: impl IntoIterator<Item = U>,
        operation: F,
    ) -> JobReport<R>
    where
        U: WorkUnit,
        R: Send + 'static,
        F: Fn(U) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        self.dispatch(job, units, operation).await
    }

    async fn dispatch<U, R, F, Fut>(
        &self,
        job: &str,
        units: impl IntoIterator<Item = U>,
        operation: F,
    ) -> JobReport<R>
    where
        U: WorkUnit,
        R: Send + 'static,
        F: Fn(U) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        let start = Instant::now();
        let mut tasks = JoinSet::new();
        let mut outputs = Vec::new();
        let mut failures = Vec::new();
        let mut submitted = 0usize;

        for unit in units {
            let label = unit.label();
            let permit = match Arc::clone(&self.permits).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    error!(job, unit = %label, "worker pool closed before unit could start");
                    failures.push(UnitFailure {
                        unit: label,
                        message: "worker pool closed".to_string(),
                    });
                    continue;
                }
            };

            let work = operation(unit);
            tasks.spawn(async move {
                let result = AssertUnwindSafe(work)
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| Err(EngineError::worker(panic_message(&*panic))));
                drop(permit);
                (label, result)
            });
            submitted += 1;

            while let Some(joined) = tasks.try_join_next() {
                record(job, joined, &mut outputs, &mut failures);
            }
        }

        debug!(job, submitted, "all units submitted");

        while let Some(joined) = tasks.join_next().await {
            record(job, joined, &mut outputs, &mut failures);
        }

        let report = JobReport {
            job: job.to_string(),
            outputs,
            failures,
            elapsed: start.elapsed(),
        };

        info!(
            job,
            total = report.total(),
            failed = report.failed(),
            "job finished in {}",
            format_duration(report.elapsed)
        );

        report
    }
}

fn record<R>(
    job: &str,
    joined: std::result::Result<(String, Result<R>), JoinError>,
    outputs: &mut Vec<R>,
    failures: &mut Vec<UnitFailure>,
) {
    match joined {
        Ok((_, Ok(output))) => outputs.push(output),
        Ok((unit, Err(e))) => {
            error!(job, unit = %unit, error = %e, "unit of work failed");
            failures.push(UnitFailure {
                unit,
                message: e.to_string(),
            });
        }
        Err(e) => {
            error!(job, error = %e, "worker task aborted");
            failures.push(UnitFailure {
                unit: "<unknown>".to_string(),
                message: e.to_string(),
            });
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("worker panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("worker panicked: {}", msg)
    } else {
        "worker panicked".to_string()
    }
}
