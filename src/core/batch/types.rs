//! Batch job types

use std::time::Duration;

/// A slice of job input handed to exactly one worker
pub trait WorkUnit: Send + 'static {
    /// Identity used when logging a failure of this unit
    fn label(&self) -> String;
}

/// Non-empty, ordered set of row ids removed by one DELETE statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIdBatch {
    ids: Vec<i64>,
}

impl RowIdBatch {
    /// Wrap `ids`, refusing an empty batch
    pub fn new(ids: Vec<i64>) -> Option<Self> {
        if ids.is_empty() {
            None
        } else {
            Some(Self { ids })
        }
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Largest id in the batch
    pub fn max_id(&self) -> i64 {
        self.ids.iter().copied().max().unwrap_or_default()
    }

    pub fn into_ids(self) -> Vec<i64> {
        self.ids
    }
}

impl WorkUnit for RowIdBatch {
    fn label(&self) -> String {
        match (self.ids.first(), self.ids.last()) {
            (Some(first), Some(last)) => {
                format!("ids {}..={} ({} rows)", first, last, self.ids.len())
            }
            _ => "empty batch".to_string(),
        }
    }
}

/// One unit that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// Label of the failed unit
    pub unit: String,
    /// Error message
    pub message: String,
}

/// Outcome of running every unit of a job through the pool
#[derive(Debug)]
pub struct JobReport<R> {
    /// Job name
    pub job: String,
    /// Results of the units that succeeded, in completion order
    pub outputs: Vec<R>,
    /// Units that failed or panicked
    pub failures: Vec<UnitFailure>,
    /// Wall clock time from first submission to last completion
    pub elapsed: Duration,
}

impl<R> JobReport<R> {
    /// Total number of units run
    pub fn total(&self) -> usize {
        self.outputs.len() + self.failures.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outputs.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when no unit failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
