//! Batch execution primitives shared by every job

pub mod guard;
pub mod partition;
pub mod pool;
pub mod types;


pub use guard::{JobGuard, JobRegistry};
pub use partition::{FileListPartitioner, FileUnit, RowIdPartitioner, partition_ids};
pub use pool::WorkerPool;
pub use types::{JobReport, RowIdBatch, UnitFailure, WorkUnit};
