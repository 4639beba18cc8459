//! Bounded top-k selection
//!
//! O(N log K) over a min-heap that never holds more than K entries.

use super::aggregator::WordCount;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// One ranked word. Rank 1 is the most frequent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: u64,
    pub rank: u32,
}

/// Heap entry. `seq` is the entry's position in the input; among equal
/// frequencies a later entry orders lower so it is evicted first.
#[derive(Debug, PartialEq, Eq)]
struct Ranked {
    frequency: u64,
    seq: usize,
    word: String,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frequency
            .cmp(&other.frequency)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `k` most frequent entries, ranked 1..=len.
///
/// `entries` must be in first-seen order. An entry only displaces the current
/// minimum when strictly more frequent, so earlier words win ties.
pub fn top_k(entries: impl IntoIterator<Item = WordCount>, k: i64) -> Vec<WordFrequency> {
    if k <= 0 {
        return Vec::new();
    }
    let k = usize::try_from(k).unwrap_or(usize::MAX);

    let mut heap: BinaryHeap<Reverse<Ranked>> = BinaryHeap::new();
    for (seq, entry) in entries.into_iter().enumerate() {
        let candidate = Ranked {
            frequency: entry.count,
            seq,
            word: entry.word,
        };

        if heap.len() < k {
            heap.push(Reverse(candidate));
        } else if let Some(mut min) = heap.peek_mut() {
            if candidate.frequency > min.0.frequency {
                *min = Reverse(candidate);
            }
        }
    }

    // Ascending order of Reverse<_> is descending order of Ranked.
    heap.into_sorted_vec()
        .into_iter()
        .enumerate()
        .map(|(i, Reverse(ranked))| WordFrequency {
            word: ranked.word,
            frequency: ranked.frequency,
            rank: i as u32 + 1,
        })
        .collect()
}
