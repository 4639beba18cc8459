//! Configuration loading tests

#[cfg(test)]
mod tests {
    use bulkops::config::{Config, DispatchMode};
    use bulkops::EngineError;

    #[test]
    fn test_example_config_is_valid() {
        let content = std::fs::read_to_string(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/bulkops.yaml.example"
        ))
        .unwrap();
        let config = Config::from_yaml_str(&content).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.deletion.batch_size, 1000);
        assert_eq!(config.deletion.timestamp_column, "created_at");
        assert_eq!(config.deletion.dispatch, DispatchMode::Await);
        assert_eq!(config.word_frequency.file_suffix, ".txt");
        assert_eq!(config.word_frequency.default_top_count, 10);
        assert!(config.engine.worker_threads.is_none());
        assert!(config.engine.pool_size() >= 1);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = Config::from_yaml_str("deletion:\n  batch_size: 0\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
