//! Work partitioning
//!
//! Turns a job's input into [`WorkUnit`]s before anything is dispatched. Both
//! partitioners materialize the full unit list up front, so a failure while
//! partitioning aborts the job before any unit runs.

use super::types::{RowIdBatch, WorkUnit};
use crate::storage::{ColumnName, RowStore, TableName, walk_files};
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Split `ids` into consecutive batches of at most `batch_size` ids.
pub fn partition_ids(ids: Vec<i64>, batch_size: usize) -> Vec<RowIdBatch> {
    ids.chunks(batch_size.max(1))
        .filter_map(|chunk| RowIdBatch::new(chunk.to_vec()))
        .collect()
}

/// Keyset-paged partitioner over rows older than a cutoff
pub struct RowIdPartitioner {
    store: Arc<dyn RowStore>,
    column: ColumnName,
    batch_size: usize,
}

impl RowIdPartitioner {
    pub fn new(store: Arc<dyn RowStore>, column: ColumnName, batch_size: usize) -> Self {
        Self {
            store,
            column,
            batch_size: batch_size.max(1),
        }
    }

    /// Every row of `table` older than `cutoff`, one batch per page.
    pub async fn partition(
        &self,
        table: &TableName,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<RowIdBatch>> {
        let mut batches = Vec::new();
        let mut after = None;

        loop {
            let page = self
                .store
                .select_ids_page(table, &self.column, cutoff, after, self.batch_size)
                .await?;
            let full = page.len() >= self.batch_size;

            match RowIdBatch::new(page) {
                Some(batch) => {
                    after = Some(batch.max_id());
                    batches.push(batch);
                }
                None => break,
            }

            if !full {
                break;
            }
        }

        debug!(
            table = %table,
            batches = batches.len(),
            rows = batches.iter().map(RowIdBatch::len).sum::<usize>(),
            "partitioned rows"
        );
        Ok(batches)
    }
}

/// One input file together with its position in the sorted file list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUnit {
    pub index: u32,
    pub path: PathBuf,
}

impl WorkUnit for FileUnit {
    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

/// Partitioner that turns a directory tree into one unit per matching file
#[derive(Debug, Clone)]
pub struct FileListPartitioner {
    suffix: String,
}

impl FileListPartitioner {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Matching files below `root`, sorted by path
    pub fn partition(&self, root: &Path) -> Result<Vec<FileUnit>> {
        let mut paths: Vec<PathBuf> = walk_files(root, &self.suffix)?.collect();
        paths.sort();

        debug!(root = %root.display(), files = paths.len(), "partitioned files");
        Ok(paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| FileUnit {
                index: index as u32,
                path,
            })
            .collect())
    }
}
