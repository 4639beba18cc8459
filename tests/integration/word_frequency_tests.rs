//! Word frequency pipeline integration tests

#[cfg(test)]
mod tests {
    use crate::common::Corpus;
    use bulkops::config::WordFrequencyConfig;
    use bulkops::{EngineError, WordFrequency, WordFrequencyService, WorkerPool};

    fn service() -> WordFrequencyService {
        WordFrequencyService::new(WorkerPool::new(4), WordFrequencyConfig::default()).unwrap()
    }

    fn ranked(result: &[WordFrequency]) -> Vec<(&str, u64, u32)> {
        result
            .iter()
            .map(|w| (w.word.as_str(), w.frequency, w.rank))
            .collect()
    }

    #[tokio::test]
    async fn test_two_file_example() {
        let corpus = Corpus::new()
            .file("one.txt", "cat cat dog")
            .file("two.txt", "dog bird bird bird");

        let result = service()
            .get_top_words(&corpus.path_string(), 2, 2)
            .await
            .unwrap();

        assert_eq!(ranked(&result), vec![("bird", 3, 1), ("cat", 2, 2)]);
    }

    #[tokio::test]
    async fn test_nested_directories_and_suffix_filter() {
        let corpus = Corpus::new()
            .file("a/b/c/deep.txt", "Kernel kernel KERNEL")
            .file("a/top.txt", "kernel module")
            .file("a/ignored.md", "module module module module");

        let result = service()
            .get_top_words(&corpus.path_string(), 3, 10)
            .await
            .unwrap();

        assert_eq!(ranked(&result), vec![("kernel", 4, 1), ("module", 1, 2)]);
    }

    #[tokio::test]
    async fn test_top_count_larger_than_vocabulary() {
        let corpus = Corpus::new().file("a.txt", "alpha beta beta");

        let result = service()
            .get_top_words(&corpus.path_string(), 0, 50)
            .await
            .unwrap();

        assert_eq!(ranked(&result), vec![("beta", 2, 1), ("alpha", 1, 2)]);
    }

    #[tokio::test]
    async fn test_zero_top_count_is_empty() {
        let corpus = Corpus::new().file("a.txt", "alpha beta");
        let result = service()
            .get_top_words(&corpus.path_string(), 0, 0)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_empty_directory_is_empty_result() {
        let corpus = Corpus::new();
        let result = service()
            .get_top_words(&corpus.path_string(), 0, 10)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let corpus = Corpus::new();
        let missing = corpus.join("absent");
        let err = service()
            .get_top_words(&missing.display().to_string(), 0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[tokio::test]
    async fn test_negative_min_length_is_validation_error() {
        let corpus = Corpus::new().file("a.txt", "alpha");
        let err = service()
            .get_top_words(&corpus.path_string(), -1, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let mut bytes = b"delta delta\n".to_vec();
        bytes.extend_from_slice(&[0xc3, 0x28, b'\n']);
        bytes.extend_from_slice(b"delta omega\n");
        let corpus = Corpus::new().file("mixed.txt", bytes);

        let result = service()
            .get_top_words(&corpus.path_string(), 0, 10)
            .await
            .unwrap();

        assert_eq!(ranked(&result), vec![("delta", 3, 1), ("omega", 1, 2)]);
    }

    #[tokio::test]
    async fn test_results_are_cached_per_parameters() {
        let corpus = Corpus::new().file("a.txt", "cat cat dog");
        let service = service();
        let folder = corpus.path_string();

        let first = service.get_top_words(&folder, 2, 10).await.unwrap();

        // The cache answers even though the files changed underneath.
        std::fs::write(corpus.join("b.txt"), "dog dog dog").unwrap();
        let second = service.get_top_words(&folder, 2, 10).await.unwrap();
        assert_eq!(first, second);

        let stats = service.cache().stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);

        // Different parameters are a different entry.
        let fresh = service.get_top_words(&folder, 2, 1).await.unwrap();
        assert_eq!(ranked(&fresh), vec![("dog", 4, 1)]);
    }

    #[tokio::test]
    async fn test_disabled_bloom_filter_gives_same_result() {
        let corpus = Corpus::new()
            .file("a.txt", "one two three two three three")
            .file("b.txt", "three four four");

        let mut config = WordFrequencyConfig::default();
        config.bloom_filter.enabled = false;
        config.cache.enabled = false;
        let plain = WordFrequencyService::new(WorkerPool::new(2), config)
            .unwrap()
            .get_top_words(&corpus.path_string(), 2, 10)
            .await
            .unwrap();
        let filtered = service()
            .get_top_words(&corpus.path_string(), 2, 10)
            .await
            .unwrap();

        assert_eq!(plain, filtered);
        assert_eq!(
            ranked(&plain),
            vec![("three", 4, 1), ("two", 2, 2), ("four", 2, 3), ("one", 1, 4)]
        );
    }
}
