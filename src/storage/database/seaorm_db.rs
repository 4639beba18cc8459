//! SeaORM backed row store
//!
//! Statements are built from validated identifiers and bound values only.

use super::identifier::{ColumnName, TableName};
use super::row_store::RowStore;
use crate::config::DatabaseConfig;
use crate::utils::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement,
    TransactionTrait, Value,
};
use std::time::Duration;
use tracing::{debug, info};

/// Row store over a SeaORM connection pool
#[derive(Debug, Clone)]
pub struct SeaOrmRowStore {
    db: DatabaseConnection,
}

impl SeaOrmRowStore {
    /// Connect using `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(false);

        let db = Database::connect(opt).await.map_err(EngineError::Database)?;
        info!(
            "Database connection established ({:?})",
            db.get_database_backend()
        );
        Ok(Self { db })
    }

    /// Wrap an existing connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        self.db.ping().await.map_err(EngineError::Database)
    }
}

fn placeholder(backend: DbBackend, position: usize) -> String {
    match backend {
        DbBackend::Postgres => format!("${}", position),
        _ => "?".to_string(),
    }
}

pub(crate) fn select_page_statement(
    backend: DbBackend,
    table: &TableName,
    column: &ColumnName,
    cutoff: NaiveDateTime,
    after: Option<i64>,
    limit: usize,
) -> Statement {
    let mut values: Vec<Value> = vec![cutoff.into()];
    // Widened so INTEGER keys decode as i64 on every backend.
    let id = match backend {
        DbBackend::MySql => "CAST(id AS SIGNED) AS id",
        _ => "CAST(id AS BIGINT) AS id",
    };
    let mut sql = format!(
        "SELECT {} FROM {} WHERE {} < {}",
        id,
        table.quoted(backend),
        column.quoted(backend),
        placeholder(backend, 1)
    );

    if let Some(after) = after {
        values.push(after.into());
        sql.push_str(&format!(" AND id > {}", placeholder(backend, values.len())));
    }

    values.push((limit as i64).into());
    sql.push_str(&format!(
        " ORDER BY id LIMIT {}",
        placeholder(backend, values.len())
    ));

    Statement::from_sql_and_values(backend, sql, values)
}

pub(crate) fn delete_statement(backend: DbBackend, table: &TableName, ids: &[i64]) -> Statement {
    let placeholders = (1..=ids.len())
        .map(|i| placeholder(backend, i))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "DELETE FROM {} WHERE id IN ({})",
        table.quoted(backend),
        placeholders
    );
    let values: Vec<Value> = ids.iter().map(|id| (*id).into()).collect();

    Statement::from_sql_and_values(backend, sql, values)
}

#[async_trait]
impl RowStore for SeaOrmRowStore {
    async fn select_ids_page(
        &self,
        table: &TableName,
        column: &ColumnName,
        cutoff: NaiveDateTime,
        after: Option<i64>,
        limit: usize,
    ) -> Result<Vec<i64>> {
        let stmt = select_page_statement(self.backend(), table, column, cutoff, after, limit);
        let rows = self.db.query_all(stmt).await?;

        let ids = rows
            .iter()
            .map(|row| row.try_get::<i64>("", "id"))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(table = %table, after = ?after, fetched = ids.len(), "fetched id page");
        Ok(ids)
    }

    async fn delete_ids(&self, table: &TableName, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Err(EngineError::validation("Refusing to submit an empty delete batch"));
        }

        let stmt = delete_statement(self.backend(), table, ids);

        let txn = self.db.begin().await?;
        let result = txn.execute(stmt).await?;
        txn.commit().await?;

        debug!(table = %table, requested = ids.len(), deleted = result.rows_affected(), "batch deleted");
        Ok(result.rows_affected())
    }
}
