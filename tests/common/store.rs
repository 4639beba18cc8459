//! In-memory row store with failure injection

use async_trait::async_trait;
use bulkops::storage::{ColumnName, RowStore, TableName};
use bulkops::{EngineError, Result};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Rows of every table, keyed by id, with the value of the timestamp column
#[derive(Default)]
pub struct InMemoryRowStore {
    tables: Mutex<BTreeMap<String, BTreeMap<i64, NaiveDateTime>>>,
    failing_ids: Mutex<HashSet<i64>>,
    fail_select: Mutex<bool>,
    delete_delay: Mutex<Option<Duration>>,
    delete_calls: AtomicUsize,
    deleted_batches: Mutex<Vec<Vec<i64>>>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: impl IntoIterator<Item = (i64, NaiveDateTime)>) -> Self {
        self.tables
            .lock()
            .entry(table.to_string())
            .or_default()
            .extend(rows);
        self
    }

    /// Any delete batch containing `id` fails
    pub fn fail_on_id(self, id: i64) -> Self {
        self.failing_ids.lock().insert(id);
        self
    }

    /// Every select fails, as if the store were unreachable
    pub fn fail_select(self) -> Self {
        *self.fail_select.lock() = true;
        self
    }

    /// Hold every delete for `delay`
    pub fn delete_delay(self, delay: Duration) -> Self {
        *self.delete_delay.lock() = Some(delay);
        self
    }

    pub fn remaining(&self, table: &str) -> Vec<i64> {
        self.tables
            .lock()
            .get(table)
            .map(|rows| rows.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Batches in the order they were deleted
    pub fn deleted_batches(&self) -> Vec<Vec<i64>> {
        self.deleted_batches.lock().clone()
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn select_ids_page(
        &self,
        table: &TableName,
        _column: &ColumnName,
        cutoff: NaiveDateTime,
        after: Option<i64>,
        limit: usize,
    ) -> Result<Vec<i64>> {
        if *self.fail_select.lock() {
            return Err(EngineError::internal("store unreachable"));
        }

        let tables = self.tables.lock();
        Ok(tables
            .get(table.as_str())
            .map(|rows| {
                rows.iter()
                    .filter(|(id, ts)| **ts < cutoff && after.is_none_or(|a| **id > a))
                    .map(|(id, _)| *id)
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete_ids(&self, table: &TableName, ids: &[i64]) -> Result<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delete_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if ids.iter().any(|id| self.failing_ids.lock().contains(id)) {
            return Err(EngineError::internal(format!("injected failure for {:?}", ids)));
        }

        let mut tables = self.tables.lock();
        let rows = tables.entry(table.to_string()).or_default();
        let removed = ids.iter().filter(|id| rows.remove(id).is_some()).count();
        self.deleted_batches.lock().push(ids.to_vec());
        Ok(removed as u64)
    }
}
