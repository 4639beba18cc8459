//! Utility modules for the batch engine
//!
//! - **error**: Error type and HTTP status mapping
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use logging::init_logging;

use std::time::Duration;

/// Format a duration as human readable string
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", total_ms as f64 / 1000.0)
    } else {
        let minutes = total_ms / 60_000;
        let seconds = (total_ms % 60_000) as f64 / 1000.0;
        format!("{}m {:.2}s", minutes, seconds)
    }
}
