//! Configuration data models
//!
//! This module defines all configuration structures used by the engine.

#![allow(missing_docs)]

pub mod deletion;
pub mod engine;
pub mod logging;
pub mod server;
pub mod storage;
pub mod word_frequency;

pub use deletion::*;
pub use engine::*;
pub use logging::*;
pub use server::*;
pub use storage::*;
pub use word_frequency::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

pub fn default_batch_size() -> usize {
    1000
}

pub fn default_timestamp_column() -> String {
    "created_at".to_string()
}

pub fn default_file_suffix() -> String {
    ".txt".to_string()
}

pub fn default_top_count() -> i64 {
    10
}

pub fn default_bloom_expected_items() -> usize {
    1_000_000
}

pub fn default_bloom_false_positive_rate() -> f64 {
    0.01
}

pub fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

pub fn default_cache_max_entries() -> usize {
    256
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
