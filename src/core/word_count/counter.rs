//! Striped counter
//!
//! Uncontended increments hit a single atomic cell. The first failed
//! compare-and-swap allocates a set of cache-padded stripes and later
//! contended increments spread across them, keyed by thread.

use crossbeam::utils::CachePadded;
use once_cell::sync::OnceCell;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

static NEXT_THREAD_SLOT: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static THREAD_SLOT: Cell<usize> = Cell::new(NEXT_THREAD_SLOT.fetch_add(1, Ordering::Relaxed));
}

fn stripe_count() -> usize {
    num_cpus::get().next_power_of_two().max(2)
}

/// Monotonic counter tolerant of many concurrent writers
#[derive(Debug, Default)]
pub struct StripedCounter {
    base: AtomicU64,
    stripes: OnceCell<Box<[CachePadded<AtomicU64>]>>,
}

impl StripedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter starting at `value`
    pub fn with_value(value: u64) -> Self {
        Self {
            base: AtomicU64::new(value),
            stripes: OnceCell::new(),
        }
    }

    pub fn increment(&self) {
        self.add(1);
    }

    pub fn add(&self, n: u64) {
        if let Some(stripes) = self.stripes.get() {
            Self::stripe_for_thread(stripes).fetch_add(n, Ordering::Relaxed);
            return;
        }

        let current = self.base.load(Ordering::Relaxed);
        if self
            .base
            .compare_exchange(current, current + n, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return;
        }

        let stripes = self.stripes.get_or_init(|| {
            (0..stripe_count())
                .map(|_| CachePadded::new(AtomicU64::new(0)))
                .collect()
        });
        Self::stripe_for_thread(stripes).fetch_add(n, Ordering::Relaxed);
    }

    /// Base plus every stripe. Exact once writers have stopped.
    pub fn sum(&self) -> u64 {
        let striped: u64 = self
            .stripes
            .get()
            .map(|stripes| stripes.iter().map(|s| s.load(Ordering::Relaxed)).sum())
            .unwrap_or(0);
        self.base.load(Ordering::Relaxed) + striped
    }

    /// Whether contention has spilled into stripes
    pub fn is_striped(&self) -> bool {
        self.stripes.get().is_some()
    }

    fn stripe_for_thread(stripes: &[CachePadded<AtomicU64>]) -> &AtomicU64 {
        let slot = THREAD_SLOT.with(Cell::get);
        &stripes[slot & (stripes.len() - 1)]
    }
}
