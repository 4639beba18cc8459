//! Services module
//!
//! The two operator-facing jobs. Each service owns its collaborators and runs
//! on the shared worker pool.

pub mod deletion;
pub mod word_frequency;

pub use deletion::{DeletionExecutor, DeletionReport, DeletionService, parse_cutoff};
pub use word_frequency::WordFrequencyService;
