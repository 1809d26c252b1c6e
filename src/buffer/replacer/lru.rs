//! LRU (Least Recently Used) replacement policy.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use log::trace;
use parking_lot::Mutex;

use crate::buffer::replacer::Replacer;

/// A thread-safe LRU set of eviction candidates.
///
/// The buffer pool inserts a frame when its pin count drops to zero, erases
/// it when it is pinned again, and asks for a victim when it needs a frame.
/// Inserting a value that is already tracked moves it to the most-recently
/// used end instead of adding it twice.
///
/// # Structure
/// ```text
///  stamps: HashMap<T, u64>          order: BTreeMap<u64, T>
///  ┌──────────┐                     ┌──────────────────────────┐
///  │ a → 3    │                     │ 1 → b   (LRU, next victim)│
///  │ b → 1    │  ◀── same set ──▶   │ 2 → c                    │
///  │ c → 2    │                     │ 3 → a   (MRU)            │
///  └──────────┘                     └──────────────────────────┘
/// ```
/// Each insert takes a fresh, strictly increasing stamp, so `order` iterates
/// from least to most recently used. Touch, victim and erase are O(log n).
///
/// # Thread Safety
/// One `Mutex` guards both maps for the duration of every operation.
///
/// # Example
/// ```
/// use bufpool_core::buffer::replacer::LruReplacer;
///
/// let replacer = LruReplacer::new();
/// replacer.insert('a');
/// replacer.insert('b');
/// replacer.insert('a'); // touch
///
/// assert_eq!(replacer.victim(), Some('b'));
/// assert_eq!(replacer.victim(), Some('a'));
/// assert_eq!(replacer.victim(), None);
/// ```
pub struct LruReplacer<T> {
    inner: Mutex<LruList<T>>,
}

/// Recency order of tracked values (guarded by `LruReplacer::inner`).
struct LruList<T> {
    /// Latest stamp of every tracked value.
    stamps: HashMap<T, u64>,

    /// Tracked values keyed by stamp, oldest first.
    order: BTreeMap<u64, T>,

    /// Stamp handed to the next insert.
    next_stamp: u64,
}

impl<T: Hash + Eq + Clone> LruList<T> {
    fn new() -> Self {
        Self {
            stamps: HashMap::new(),
            order: BTreeMap::new(),
            next_stamp: 0,
        }
    }

    fn touch(&mut self, value: T) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        if let Some(previous) = self.stamps.insert(value.clone(), stamp) {
            self.order.remove(&previous);
        }
        self.order.insert(stamp, value);
    }

    fn pop_lru(&mut self) -> Option<T> {
        let (_, value) = self.order.pop_first()?;
        self.stamps.remove(&value);
        Some(value)
    }

    fn remove(&mut self, value: &T) -> bool {
        match self.stamps.remove(value) {
            Some(stamp) => {
                self.order.remove(&stamp);
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

impl<T: Hash + Eq + Clone> LruReplacer<T> {
    /// Create an empty replacer.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LruList::new()),
        }
    }

    /// Mark `value` as most recently used, tracking it if it is new.
    pub fn insert(&self, value: T) {
        self.inner.lock().touch(value);
    }

    /// Remove and return the least recently used value.
    ///
    /// Returns `None` (and changes nothing) if no value is tracked.
    pub fn victim(&self) -> Option<T> {
        let mut list = self.inner.lock();
        let victim = list.pop_lru();
        if victim.is_some() {
            trace!("lru victim chosen, {} candidates remain", list.len());
        }
        victim
    }

    /// Stop tracking `value`, returning whether it was tracked.
    pub fn erase(&self, value: &T) -> bool {
        self.inner.lock().remove(value)
    }

    /// Number of tracked values.
    pub fn size(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether `value` is currently tracked.
    pub fn contains(&self, value: &T) -> bool {
        self.inner.lock().stamps.contains_key(value)
    }
}

impl<T: Hash + Eq + Clone> Default for LruReplacer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone + Send> Replacer<T> for LruReplacer<T> {
    fn insert(&self, value: T) {
        LruReplacer::insert(self, value)
    }

    fn victim(&self) -> Option<T> {
        LruReplacer::victim(self)
    }

    fn erase(&self, value: &T) -> bool {
        LruReplacer::erase(self, value)
    }

    fn size(&self) -> usize {
        LruReplacer::size(self)
    }
}
