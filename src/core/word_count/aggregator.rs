//! Concurrent frequency table
//!
//! Shared by the workers of a single job. Words live in a sharded map so
//! unrelated words never contend; a hot word only contends on its own
//! striped counter.

use super::counter::StripedCounter;
use super::filter::MembershipFilter;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Bits reserved for the word ordinal inside a file
const ORDINAL_BITS: u32 = 40;

/// Encode a first-seen position; earlier files and earlier words compare lower.
pub fn position(file_index: u32, word_ordinal: u64) -> u64 {
    ((file_index as u64) << ORDINAL_BITS) | (word_ordinal & ((1 << ORDINAL_BITS) - 1))
}

#[derive(Debug)]
struct WordCounter {
    count: StripedCounter,
    first_seen: AtomicU64,
}

impl WordCounter {
    fn new(first_seen: u64) -> Self {
        Self {
            count: StripedCounter::new(),
            first_seen: AtomicU64::new(first_seen),
        }
    }

    fn record(&self, position: u64) {
        self.count.increment();
        self.first_seen.fetch_min(position, Ordering::Relaxed);
    }
}

/// Total occurrences of one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
    /// Earliest encoded position the word was seen at
    pub first_seen: u64,
}

/// Word -> occurrence count, safe for concurrent writers
#[derive(Debug, Default)]
pub struct FrequencyTable {
    words: DashMap<String, WordCounter>,
    filter: Option<Box<dyn MembershipFilter>>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a membership pre-filter
    pub fn with_filter(filter: Box<dyn MembershipFilter>) -> Self {
        Self {
            words: DashMap::new(),
            filter: Some(filter),
        }
    }

    /// Count one occurrence with no position information
    pub fn increment(&self, word: &str) {
        self.increment_seen_at(word, u64::MAX);
    }

    /// Count one occurrence of `word` observed at `position`
    pub fn increment_seen_at(&self, word: &str, position: u64) {
        match &self.filter {
            Some(filter) if !filter.may_contain(word) => {
                filter.insert(word);
                self.upsert(word, position);
            }
            _ => {
                // Known or possibly known; a false positive lands in the entry path.
                if let Some(counter) = self.words.get(word) {
                    counter.record(position);
                } else {
                    self.upsert(word, position);
                }
            }
        }
    }

    fn upsert(&self, word: &str, position: u64) {
        self.words
            .entry(word.to_string())
            .or_insert_with(|| WordCounter::new(position))
            .record(position);
    }

    /// Count for `word`, if seen
    pub fn get(&self, word: &str) -> Option<u64> {
        self.words.get(word).map(|c| c.count.sum())
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Totals per word ordered by first-seen position, then by word.
    ///
    /// Only meaningful once every writer has finished.
    pub fn snapshot(&self) -> Vec<WordCount> {
        let mut entries: Vec<WordCount> = self
            .words
            .iter()
            .map(|entry| WordCount {
                word: entry.key().clone(),
                count: entry.value().count.sum(),
                first_seen: entry.value().first_seen.load(Ordering::Relaxed),
            })
            .collect();
        entries.sort_by(|a, b| a.first_seen.cmp(&b.first_seen).then_with(|| a.word.cmp(&b.word)));
        entries
    }
}
