//! Purging rows older than a cutoff

use crate::config::{DeletionConfig, DispatchMode};
use crate::core::batch::{JobRegistry, JobReport, RowIdBatch, RowIdPartitioner, WorkerPool};
use crate::storage::{ColumnName, RowStore, TableName};
use crate::utils::error::{EngineError, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of a deletion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
    pub table: String,
    pub cutoff: NaiveDateTime,
    pub batches_dispatched: usize,
    pub batches_failed: usize,
    /// Rows removed; unknown when the batches run in the background
    pub rows_deleted: Option<u64>,
    pub message: String,
}

/// Deletes one batch of ids in its own transaction
#[derive(Clone)]
pub struct DeletionExecutor {
    store: Arc<dyn RowStore>,
}

impl DeletionExecutor {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, table: &TableName, batch: &RowIdBatch) -> Result<u64> {
        if batch.is_empty() {
            return Err(EngineError::validation("Refusing to submit an empty delete batch"));
        }
        self.store.delete_ids(table, batch.ids()).await
    }

    /// Run every batch through `pool` and wait for all of them
    pub async fn execute_all(
        &self,
        pool: &WorkerPool,
        table: &TableName,
        batches: Vec<RowIdBatch>,
    ) -> JobReport<u64> {
        let executor = self.clone();
        let target = table.clone();
        pool.run_async(&format!("delete:{}", table), batches, move |batch| {
            let executor = executor.clone();
            let table = target.clone();
            async move { executor.execute(&table, &batch).await }
        })
        .await
    }
}

/// Single-flight, batched deletion of old rows
pub struct DeletionService {
    registry: Arc<JobRegistry>,
    pool: WorkerPool,
    executor: DeletionExecutor,
    partitioner: RowIdPartitioner,
    config: DeletionConfig,
}

impl DeletionService {
    pub fn new(store: Arc<dyn RowStore>, pool: WorkerPool, config: DeletionConfig) -> Result<Self> {
        let column = ColumnName::parse(&config.timestamp_column)?;
        Ok(Self {
            registry: Arc::new(JobRegistry::new()),
            pool,
            executor: DeletionExecutor::new(Arc::clone(&store)),
            partitioner: RowIdPartitioner::new(store, column, config.batch_size),
            config,
        })
    }

    /// Registry of tables with a running deletion
    pub fn registry(&self) -> &Arc<JobRegistry> {
        &self.registry
    }

    /// Delete every row of `table_name` older than `older_than`.
    ///
    /// Fails with `Conflict` if a deletion on the same table is still running.
    /// Partitioning completes before any batch runs, so a failure there
    /// deletes nothing.
    pub async fn start_deletion(
        &self,
        table_name: &str,
        older_than: NaiveDateTime,
    ) -> Result<DeletionReport> {
        let table = TableName::parse_allowed(table_name, &self.config.allowed_tables)?;
        info!("Start cleaning for {} table by date {}", table, older_than);

        let guard = self.registry.acquire(table.as_str()).ok_or_else(|| {
            EngineError::conflict(format!(
                "Deletion process already running for table: {}",
                table
            ))
        })?;

        let batches = self.partitioner.partition(&table, older_than).await?;
        let dispatched = batches.len();
        info!(table = %table, batches = dispatched, "Load ids for deletion");

        match self.config.dispatch {
            DispatchMode::Await => {
                // The job owns the guard so it runs to completion even if the
                // caller stops waiting.
                let executor = self.executor.clone();
                let pool = self.pool.clone();
                let target = table.clone();
                let job = tokio::spawn(async move {
                    let _guard = guard;
                    executor.execute_all(&pool, &target, batches).await
                });
                let report = job.await.map_err(|e| {
                    EngineError::worker(format!("deletion job for table {} failed: {}", table, e))
                })?;

                let rows: u64 = report.outputs.iter().sum();
                info!(table = %table, rows, failed = report.failed(), "deletion finished");
                Ok(DeletionReport {
                    message: format!("Deletion process completed for table: {}", table),
                    table: table.to_string(),
                    cutoff: older_than,
                    batches_dispatched: dispatched,
                    batches_failed: report.failed(),
                    rows_deleted: Some(rows),
                })
            }
            DispatchMode::Background => {
                let executor = self.executor.clone();
                let pool = self.pool.clone();
                let target = table.clone();
                tokio::spawn(async move {
                    // Released only once the last batch has finished.
                    let _guard = guard;
                    let report = executor.execute_all(&pool, &target, batches).await;
                    let rows: u64 = report.outputs.iter().sum();
                    if report.is_clean() {
                        info!(table = %target, rows, "background deletion finished");
                    } else {
                        error!(table = %target, rows, failed = report.failed(), "background deletion finished with failures");
                    }
                });

                Ok(DeletionReport {
                    message: format!("Deletion process started for table: {}", table),
                    table: table.to_string(),
                    cutoff: older_than,
                    batches_dispatched: dispatched,
                    batches_failed: 0,
                    rows_deleted: None,
                })
            }
        }
    }
}

/// Parse an ISO-8601 local date-time such as `2024-01-31T12:00:00`.
///
/// Seconds and fractions are optional; an RFC 3339 offset is converted to UTC.
pub fn parse_cutoff(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_utc()))
        .map_err(|_| {
            EngineError::validation(format!(
                "Invalid olderThan value '{}': expected an ISO-8601 date-time",
                raw
            ))
        })
}
