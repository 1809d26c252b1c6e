//! Eviction policy implementations (replacers).
//!
//! Currently implements:
//! - [`LruReplacer`] - Least Recently Used

mod lru;

pub use lru::LruReplacer;

/// Tracks which frames may be evicted and picks the next victim.
///
/// All methods take `&self`; implementations synchronize internally so a
/// replacer can be shared between threads of the buffer pool.
pub trait Replacer<T>: Send + Sync {
    /// Record `value` as an eviction candidate, or refresh it if already
    /// tracked.
    fn insert(&self, value: T);

    /// Remove and return the next value to evict, if any.
    fn victim(&self) -> Option<T>;

    /// Stop tracking `value` (e.g. it was pinned again).
    fn erase(&self, value: &T) -> bool;

    /// Number of tracked values.
    fn size(&self) -> usize;
}
