//! Approximate membership filters
//!
//! A filter only ever says "definitely new" or "maybe seen". Callers must treat
//! "maybe seen" as a hint and still go through the authoritative table.

use crate::config::BloomFilterConfig;
use ahash::RandomState;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Pluggable pre-check in front of the frequency table
pub trait MembershipFilter: Send + Sync + Debug {
    /// False means the key was never inserted
    fn may_contain(&self, key: &str) -> bool;

    fn insert(&self, key: &str);
}

/// Lock-free Bloom filter over atomic bit words
#[derive(Debug)]
pub struct BloomFilter {
    words: Box<[AtomicU64]>,
    bit_count: u64,
    hash_count: u32,
    primary: RandomState,
    secondary: RandomState,
}

impl BloomFilter {
    /// Size the filter for `expected_items` at `false_positive_rate`.
    ///
    /// bits = -n ln p / (ln 2)^2, hashes = bits / n * ln 2
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Self {
        let n = expected_items.max(1) as f64;
        let p = false_positive_rate.clamp(f64::MIN_POSITIVE, 0.5);
        let ln2 = std::f64::consts::LN_2;

        let bits = (-(n * p.ln()) / (ln2 * ln2)).ceil().max(64.0) as u64;
        let hash_count = ((bits as f64 / n) * ln2).round().clamp(1.0, 16.0) as u32;
        let word_count = bits.div_ceil(64) as usize;

        Self {
            words: (0..word_count).map(|_| AtomicU64::new(0)).collect(),
            bit_count: word_count as u64 * 64,
            hash_count,
            primary: RandomState::with_seeds(
                0x243f_6a88_85a3_08d3,
                0x1319_8a2e_0370_7344,
                0xa409_3822_299f_31d0,
                0x082e_fa98_ec4e_6c89,
            ),
            secondary: RandomState::with_seeds(
                0x9e37_79b9_7f4a_7c15,
                0xbf58_476d_1ce4_e5b9,
                0x94d0_49bb_1331_11eb,
                0x2545_f491_4f6c_dd1d,
            ),
        }
    }

    pub fn from_config(config: &BloomFilterConfig) -> Self {
        Self::new(config.expected_items, config.false_positive_rate)
    }

    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    fn positions<'a>(&'a self, key: &str) -> impl Iterator<Item = (usize, u64)> + 'a {
        let h1 = self.primary.hash_one(key);
        let h2 = self.secondary.hash_one(key) | 1;
        (0..self.hash_count as u64).map(move |i| {
            let bit = h1.wrapping_add(i.wrapping_mul(h2)) % self.bit_count;
            ((bit / 64) as usize, 1u64 << (bit % 64))
        })
    }
}

impl MembershipFilter for BloomFilter {
    fn may_contain(&self, key: &str) -> bool {
        self.positions(key)
            .all(|(word, mask)| self.words[word].load(Ordering::Acquire) & mask != 0)
    }

    fn insert(&self, key: &str) {
        for (word, mask) in self.positions(key) {
            self.words[word].fetch_or(mask, Ordering::Release);
        }
    }
}
