//! Single-flight job registry
//!
//! At most one job may hold a given resource key. A second caller is
//! rejected immediately rather than queued.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Registry of resource keys currently held by a running job
#[derive(Debug, Default)]
pub struct JobRegistry {
    /// Key -> time the holding job started
    active: DashMap<String, Instant>,
}

impl JobRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` if absent. Returns true iff this call inserted it.
    pub fn try_acquire(&self, key: &str) -> bool {
        match self.active.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                true
            }
        }
    }

    /// Remove `key`. Returns false if it was not held.
    pub fn release(&self, key: &str) -> bool {
        self.active.remove(key).is_some()
    }

    /// Scoped acquisition: the key is released when the guard drops.
    pub fn acquire(self: &Arc<Self>, key: &str) -> Option<JobGuard> {
        if self.try_acquire(key) {
            debug!(key, "job key acquired");
            Some(JobGuard {
                registry: Arc::clone(self),
                key: key.to_string(),
            })
        } else {
            None
        }
    }

    /// Whether a job currently holds `key`
    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains_key(key)
    }

    /// How long the job holding `key` has been running
    pub fn held_for(&self, key: &str) -> Option<Duration> {
        self.active.get(key).map(|started| started.elapsed())
    }

    /// Number of keys currently held
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Holds a registry key for the lifetime of a job
#[derive(Debug)]
pub struct JobGuard {
    registry: Arc<JobRegistry>,
    key: String,
}

impl JobGuard {
    /// The held key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.registry.release(&self.key);
        debug!(key = %self.key, "job key released");
    }
}
