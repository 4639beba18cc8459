//! Deletion pipeline integration tests

#[cfg(test)]
mod tests {
    use crate::common::{InMemoryRowStore, day};
    use bulkops::config::{DeletionConfig, DispatchMode};
    use bulkops::{DeletionService, EngineError, WorkerPool};
    use std::sync::Arc;
    use std::time::Duration;

    /// ids 1..=10; even ids on Jan 1st, odd ids on Jan 20th
    fn store() -> InMemoryRowStore {
        InMemoryRowStore::new().with_rows(
            "events",
            (1..=10).map(|id| (id, if id % 2 == 0 { day(1) } else { day(20) })),
        )
    }

    fn service(store: Arc<InMemoryRowStore>, config: DeletionConfig) -> DeletionService {
        DeletionService::new(store, WorkerPool::new(4), config).unwrap()
    }

    #[tokio::test]
    async fn test_deletes_only_rows_before_cutoff_in_batches() {
        let store = Arc::new(store());
        let service = service(Arc::clone(&store), DeletionConfig::default().with_batch_size(2));

        let report = service.start_deletion("events", day(10)).await.unwrap();

        assert_eq!(report.batches_dispatched, 3);
        assert_eq!(report.batches_failed, 0);
        assert_eq!(report.rows_deleted, Some(5));
        assert_eq!(report.message, "Deletion process completed for table: events");
        assert_eq!(store.remaining("events"), vec![1, 3, 5, 7, 9]);

        let mut batches = store.deleted_batches();
        batches.sort();
        assert_eq!(batches, vec![vec![2, 4], vec![6, 8], vec![10]]);
        assert!(!service.registry().is_active("events"));
    }

    #[tokio::test]
    async fn test_no_matching_rows() {
        let store = Arc::new(store());
        let service = service(Arc::clone(&store), DeletionConfig::default());

        let report = service.start_deletion("events", day(1)).await.unwrap();

        assert_eq!(report.batches_dispatched, 0);
        assert_eq!(report.rows_deleted, Some(0));
        assert_eq!(store.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_overlapping_requests_conflict() {
        let store = Arc::new(store().delete_delay(Duration::from_millis(100)));
        let service = Arc::new(service(
            Arc::clone(&store),
            DeletionConfig::default().with_batch_size(2),
        ));

        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.start_deletion("events", day(10)).await })
        };
        while !service.registry().is_active("events") {
            tokio::task::yield_now().await;
        }

        let second = service.start_deletion("events", day(10)).await;
        match second {
            Err(EngineError::Conflict(msg)) => {
                assert_eq!(msg, "Deletion process already running for table: events")
            }
            other => panic!("expected conflict, got {:?}", other),
        }

        assert!(first.await.unwrap().is_ok());
        assert!(service.start_deletion("events", day(10)).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_requests_have_single_winner() {
        let store = Arc::new(store().delete_delay(Duration::from_millis(50)));
        let service = Arc::new(service(Arc::clone(&store), DeletionConfig::default()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.start_deletion("events", day(10)).await })
            })
            .collect();

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(EngineError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        // Winners never overlap; a later winner may only start after the
        // previous one released the table.
        assert!(ok >= 1);
        assert_eq!(ok + conflicts, 8);
        assert_eq!(store.remaining("events"), vec![1, 3, 5, 7, 9]);
    }

    #[tokio::test]
    async fn test_different_tables_run_concurrently() {
        let store = Arc::new(
            store()
                .with_rows("audit", (1..=4).map(|id| (id, day(1))))
                .delete_delay(Duration::from_millis(50)),
        );
        let service = Arc::new(service(Arc::clone(&store), DeletionConfig::default()));

        let (a, b) = tokio::join!(
            service.start_deletion("events", day(10)),
            service.start_deletion("audit", day(10)),
        );

        assert_eq!(a.unwrap().rows_deleted, Some(5));
        assert_eq!(b.unwrap().rows_deleted, Some(4));
    }

    #[tokio::test]
    async fn test_failed_batch_is_reported_and_lock_released() {
        let store = Arc::new(store().fail_on_id(6));
        let service = service(Arc::clone(&store), DeletionConfig::default().with_batch_size(2));

        let report = service.start_deletion("events", day(10)).await.unwrap();

        assert_eq!(report.batches_dispatched, 3);
        assert_eq!(report.batches_failed, 1);
        assert_eq!(report.rows_deleted, Some(3));
        assert_eq!(store.remaining("events"), vec![1, 3, 5, 6, 7, 8, 9]);
        assert!(!service.registry().is_active("events"));
    }

    #[tokio::test]
    async fn test_partition_failure_deletes_nothing_and_releases() {
        let store = Arc::new(store().fail_select());
        let service = service(Arc::clone(&store), DeletionConfig::default());

        let err = service.start_deletion("events", day(10)).await.unwrap_err();

        assert!(matches!(err, EngineError::Internal(_)));
        assert_eq!(store.delete_calls(), 0);
        assert!(!service.registry().is_active("events"));
    }

    #[tokio::test]
    async fn test_invalid_and_disallowed_tables_are_rejected() {
        let store = Arc::new(store());
        let service = service(
            Arc::clone(&store),
            DeletionConfig::default().with_allowed_tables(["events"]),
        );

        for table in ["events; DROP TABLE users", "audit"] {
            let err = service.start_deletion(table, day(10)).await.unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)), "{table}");
        }
        assert_eq!(store.delete_calls(), 0);
        assert_eq!(service.registry().active_count(), 0);
    }

    #[tokio::test]
    async fn test_background_dispatch_holds_lock_until_done() {
        let store = Arc::new(store().delete_delay(Duration::from_millis(100)));
        let service = service(
            Arc::clone(&store),
            DeletionConfig::default()
                .with_batch_size(2)
                .with_dispatch(DispatchMode::Background),
        );

        let report = service.start_deletion("events", day(10)).await.unwrap();
        assert_eq!(report.rows_deleted, None);
        assert_eq!(report.batches_dispatched, 3);
        assert_eq!(report.message, "Deletion process started for table: events");

        // Still running: the table stays locked.
        assert!(matches!(
            service.start_deletion("events", day(10)).await,
            Err(EngineError::Conflict(_))
        ));

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while service.registry().is_active("events") {
            assert!(tokio::time::Instant::now() < deadline, "lock never released");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.remaining("events"), vec![1, 3, 5, 7, 9]);
    }

    #[tokio::test]
    async fn test_abandoned_request_still_deletes_every_batch() {
        let store = Arc::new(store().delete_delay(Duration::from_millis(100)));
        let service = DeletionService::new(
            Arc::<InMemoryRowStore>::clone(&store),
            WorkerPool::new(1),
            DeletionConfig::default().with_batch_size(1),
        )
        .unwrap();

        // The caller gives up while batches are still queued.
        let abandoned =
            tokio::time::timeout(Duration::from_millis(150), service.start_deletion("events", day(10)))
                .await;
        assert!(abandoned.is_err());
        assert!(service.registry().is_active("events"));
        assert!(matches!(
            service.start_deletion("events", day(10)).await,
            Err(EngineError::Conflict(_))
        ));

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while service.registry().is_active("events") {
            assert!(tokio::time::Instant::now() < deadline, "lock never released");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.remaining("events"), vec![1, 3, 5, 7, 9]);
        assert_eq!(store.delete_calls(), 5);
    }
}
