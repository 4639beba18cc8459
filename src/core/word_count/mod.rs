//! Word frequency building blocks
//!
//! Extraction turns lines into words, the [`FrequencyTable`] aggregates them
//! across workers and [`top_k`] reduces the final snapshot.

pub mod aggregator;
pub mod counter;
pub mod extract;
pub mod filter;
pub mod top_k;


pub use aggregator::{FrequencyTable, WordCount, position};
pub use counter::StripedCounter;
pub use extract::{FileStats, count_file, extract_words};
pub use filter::{BloomFilter, MembershipFilter};
pub use top_k::{WordFrequency, top_k};
