//! SeaORM row store tests against in-memory SQLite

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, day};
    use bulkops::config::DeletionConfig;
    use bulkops::storage::{ColumnName, RowStore, TableName};
    use bulkops::{DeletionService, EngineError, WorkerPool};

    fn events() -> TableName {
        TableName::parse("events").unwrap()
    }

    fn created_at() -> ColumnName {
        ColumnName::parse("created_at").unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let db = TestDatabase::new().await;
        assert!(db.store().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_select_pages_by_id() {
        let db = TestDatabase::new().await;
        db.seed((1..=10).map(|id| (id, if id % 2 == 0 { day(1) } else { day(20) })))
            .await;
        let store = db.store();

        let first = store
            .select_ids_page(&events(), &created_at(), day(10), None, 2)
            .await
            .unwrap();
        assert_eq!(first, vec![2, 4]);

        let next = store
            .select_ids_page(&events(), &created_at(), day(10), Some(4), 2)
            .await
            .unwrap();
        assert_eq!(next, vec![6, 8]);

        let last = store
            .select_ids_page(&events(), &created_at(), day(10), Some(8), 2)
            .await
            .unwrap();
        assert_eq!(last, vec![10]);
    }

    #[tokio::test]
    async fn test_delete_ids_reports_rows_affected() {
        let db = TestDatabase::new().await;
        db.seed((1..=5).map(|id| (id, day(1)))).await;
        let store = db.store();

        let deleted = store.delete_ids(&events(), &[2, 4, 99]).await.unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(db.remaining_ids().await, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn test_empty_delete_is_rejected() {
        let db = TestDatabase::new().await;
        let err = db.store().delete_ids(&events(), &[]).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_table_is_database_error() {
        let db = TestDatabase::new().await;
        let err = db
            .store()
            .select_ids_page(
                &TableName::parse("nope").unwrap(),
                &created_at(),
                day(10),
                None,
                10,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Database(_)));
    }

    #[tokio::test]
    async fn test_deletion_service_end_to_end() {
        let db = TestDatabase::new().await;
        db.seed((1..=10).map(|id| (id, if id % 2 == 0 { day(1) } else { day(20) })))
            .await;

        let service = DeletionService::new(
            db.store(),
            WorkerPool::new(2),
            DeletionConfig::default().with_batch_size(2),
        )
        .unwrap();

        let report = service.start_deletion("events", day(10)).await.unwrap();

        assert_eq!(report.batches_dispatched, 3);
        assert_eq!(report.rows_deleted, Some(5));
        assert_eq!(db.remaining_ids().await, vec![1, 3, 5, 7, 9]);
    }
}
