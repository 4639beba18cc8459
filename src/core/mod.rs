//! Core batch engine
//!
//! - **batch**: single-flight guard, bounded worker pool, work partitioning
//! - **word_count**: word extraction, concurrent aggregation, top-k selection
//! - **cache_manager**: memoization of word frequency results

pub mod batch;
pub mod cache_manager;
pub mod word_count;
