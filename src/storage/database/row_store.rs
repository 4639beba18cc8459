//! Row store contract used by the deletion pipeline

use super::identifier::{ColumnName, TableName};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Relational store able to enumerate and delete rows by id.
///
/// Each call runs in its own transaction; no transaction spans calls.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Ids of rows whose `column` is strictly before `cutoff` and whose id is
    /// greater than `after`, ascending, at most `limit` of them.
    async fn select_ids_page(
        &self,
        table: &TableName,
        column: &ColumnName,
        cutoff: NaiveDateTime,
        after: Option<i64>,
        limit: usize,
    ) -> Result<Vec<i64>>;

    /// Delete exactly `ids` from `table` in a fresh transaction and return the
    /// number of rows removed.
    async fn delete_ids(&self, table: &TableName, ids: &[i64]) -> Result<u64>;
}
