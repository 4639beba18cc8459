//! Test database utilities
//!
//! Each test gets an isolated in-memory SQLite database behind a
//! [`SeaOrmRowStore`].

use bulkops::config::DatabaseConfig;
use bulkops::storage::SeaOrmRowStore;
use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<SeaOrmRowStore>,
}

impl TestDatabase {
    /// Create a new in-memory test database with an empty `events` table
    pub async fn new() -> Self {
        let config = test_db_config();
        let store = SeaOrmRowStore::connect(&config)
            .await
            .expect("Failed to create in-memory test database");

        store
            .connection()
            .execute(Statement::from_string(
                DbBackend::Sqlite,
                "CREATE TABLE events (id INTEGER PRIMARY KEY, created_at TIMESTAMP NOT NULL, payload TEXT)",
            ))
            .await
            .expect("Failed to create events table");

        Self {
            inner: Arc::new(store),
        }
    }

    /// Insert rows into `events`
    pub async fn seed(&self, rows: impl IntoIterator<Item = (i64, NaiveDateTime)>) {
        for (id, created_at) in rows {
            self.inner
                .connection()
                .execute(Statement::from_sql_and_values(
                    DbBackend::Sqlite,
                    "INSERT INTO events (id, created_at, payload) VALUES (?, ?, ?)",
                    [id.into(), created_at.into(), format!("row {id}").into()],
                ))
                .await
                .expect("Failed to seed events");
        }
    }

    /// Ids left in `events`, ascending
    pub async fn remaining_ids(&self) -> Vec<i64> {
        self.inner
            .connection()
            .query_all(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT id FROM events ORDER BY id",
            ))
            .await
            .expect("Failed to query events")
            .iter()
            .map(|row| row.try_get::<i64>("", "id").expect("id column"))
            .collect()
    }

    pub fn store(&self) -> Arc<SeaOrmRowStore> {
        Arc::clone(&self.inner)
    }
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
    }
}
