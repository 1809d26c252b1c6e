//! Page table statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters maintained by an [`ExtendibleHashTable`](super::ExtendibleHashTable).
///
/// All fields are atomic so they can be read without taking the table's
/// lock. We use `Ordering::Relaxed` throughout: each counter only needs
/// atomicity, and no counter is used to synchronize with another.
///
/// # Example
/// ```
/// use bufpool_core::hash::HashTableStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = HashTableStats::new();
/// stats.lookups.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.lookups.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct HashTableStats {
    /// Number of `find` calls.
    pub lookups: AtomicU64,

    /// Number of `find` calls that returned a value.
    pub hits: AtomicU64,

    /// Number of `insert` calls (new keys and overwrites).
    pub inserts: AtomicU64,

    /// Number of `remove` calls that removed an entry.
    pub removals: AtomicU64,

    /// Number of bucket splits (equals buckets created after construction).
    pub splits: AtomicU64,

    /// Number of times the directory doubled.
    pub directory_doublings: AtomicU64,

    /// Number of entries stored beyond bucket capacity because the bucket
    /// could not be split any further.
    pub overflow_inserts: AtomicU64,
}

impl HashTableStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            lookups: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            removals: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            directory_doublings: AtomicU64::new(0),
            overflow_inserts: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of lookups that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a non-atomic copy of the counters.
    pub fn snapshot(&self) -> HashTableStatsSnapshot {
        HashTableStatsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            directory_doublings: self.directory_doublings.load(Ordering::Relaxed),
            overflow_inserts: self.overflow_inserts.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    ///
    /// Structural counters (`splits`, `directory_doublings`) are reset too,
    /// so after a reset they no longer match the table's shape.
    pub fn reset(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.removals.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.directory_doublings.store(0, Ordering::Relaxed);
        self.overflow_inserts.store(0, Ordering::Relaxed);
    }
}

impl Default for HashTableStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`HashTableStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashTableStatsSnapshot {
    pub lookups: u64,
    pub hits: u64,
    pub inserts: u64,
    pub removals: u64,
    pub splits: u64,
    pub directory_doublings: u64,
    pub overflow_inserts: u64,
}

impl HashTableStatsSnapshot {
    /// Fraction of lookups that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

impl fmt::Display for HashTableStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PageTableStats {{ lookups: {}, hit_rate: {:.2}%, inserts: {}, removals: {}, splits: {}, doublings: {} }}",
            self.lookups,
            self.hit_rate() * 100.0,
            self.inserts,
            self.removals,
            self.splits,
            self.directory_doublings
        )
    }
}
