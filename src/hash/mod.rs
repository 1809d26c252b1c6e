//! Hash-based indexes.
//!
//! # Components
//! - [`HashTable`] - The interface a buffer pool uses for its page table
//! - [`ExtendibleHashTable`] - Concurrent extendible hashing implementation
//! - [`PageTable`] - `PageId -> FrameId` instantiation
//! - [`BuildIdentityHasher`] - Identity hashing for integer keys
//! - [`HashTableStats`] - Operation counters

mod bucket;
mod extendible_hash_table;
mod hasher;
mod stats;

pub use extendible_hash_table::{DefaultBuildHasher, ExtendibleHashTable};
pub use hasher::{BuildIdentityHasher, IdentityHasher};
pub use stats::{HashTableStats, HashTableStatsSnapshot};

use crate::common::{FrameId, PageId};

/// A thread-safe key/value map.
///
/// All methods take `&self`; implementations synchronize internally.
pub trait HashTable<K, V>: Send + Sync {
    /// Look up the value stored for `key`.
    fn find(&self, key: &K) -> Option<V>;

    /// Remove `key`, returning whether it was present.
    fn remove(&self, key: &K) -> bool;

    /// Insert or overwrite `key -> value`.
    fn insert(&self, key: K, value: V);
}

/// The buffer pool's page table: which frame holds each resident page.
pub type PageTable = ExtendibleHashTable<PageId, FrameId, BuildIdentityHasher>;
