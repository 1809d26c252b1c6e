//! Extendible hash table - the buffer pool's page table.
//!
//! The [`ExtendibleHashTable`] maps keys to values through a directory of
//! `2^global_depth` slots, each pointing at a bucket. Several slots may share
//! one bucket. When a bucket overflows it splits on one more hash bit, and
//! the directory doubles only when the splitting bucket was already using
//! every directory bit.

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

use log::{debug, trace, warn};
use parking_lot::Mutex;

use crate::common::config::{DEFAULT_BUCKET_CAPACITY, MAX_DIRECTORY_LEN, MAX_GLOBAL_DEPTH};
use crate::common::{Error, Result};
use crate::hash::bucket::Bucket;
use crate::hash::{HashTable, HashTableStats};

/// Hasher used when none is supplied: SipHash with fixed keys, so a given
/// key always lands in the same slot across runs.
pub type DefaultBuildHasher = BuildHasherDefault<DefaultHasher>;

/// Position of a bucket in the table's bucket arena.
type BucketId = usize;

/// A concurrent hash table using extendible hashing.
///
/// # Architecture
/// ```text
///   hash(key) & (2^global_depth - 1)
///              │
///              ▼
/// ┌──────────────────────────┐      ┌─────────────────────────────┐
/// │ directory: Vec<BucketId> │      │ buckets: Vec<Bucket>        │
/// │  slot 00 ─────────────────────┬──▶│  B0 local_depth=1  {k, k..} │
/// │  slot 10 ─────────────────────┘   │                             │
/// │  slot 01 ────────────────────────▶│  B1 local_depth=2  {k, k..} │
/// │  slot 11 ────────────────────────▶│  B2 local_depth=2  {k, k..} │
/// └──────────────────────────┘      └─────────────────────────────┘
/// ```
/// Slots `00` and `10` alias B0 because B0 only distinguishes one bit.
///
/// # Thread Safety
/// The directory and every bucket sit behind one `Mutex`, held for the whole
/// of each public operation. Operations on one table are fully serialized.
/// `stats` is outside the lock; its counters are atomic.
///
/// # Growth
/// The table only grows: `global_depth` never decreases and buckets are
/// never merged, even when they become empty.
///
/// # Example
/// ```
/// use bufpool_core::hash::ExtendibleHashTable;
///
/// let table = ExtendibleHashTable::new(2).unwrap();
/// table.insert(1, "a");
/// table.insert(2, "b");
/// table.insert(3, "c");
///
/// assert_eq!(table.find(&3), Some("c"));
/// assert!(table.remove(&1));
/// assert_eq!(table.find(&1), None);
/// ```
pub struct ExtendibleHashTable<K, V, S = DefaultBuildHasher> {
    /// Directory and buckets.
    inner: Mutex<Directory<K, V>>,

    /// Builds the hasher used for addressing (fixed for the table's life).
    hasher: S,

    /// Maximum entries per bucket before it must split.
    bucket_capacity: usize,

    /// Operation counters.
    stats: HashTableStats,
}

/// Everything guarded by the table lock.
struct Directory<K, V> {
    /// Number of low-order hash bits used to pick a slot.
    global_depth: u32,

    /// `2^global_depth` slots, each naming a bucket in `buckets`.
    slots: Vec<BucketId>,

    /// Bucket arena. Buckets are appended by splits and never freed.
    buckets: Vec<Bucket<K, V>>,

    /// Total entries across all buckets.
    len: usize,
}

impl<K, V> ExtendibleHashTable<K, V, DefaultBuildHasher>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Create a table whose buckets hold at most `bucket_capacity` entries.
    ///
    /// # Errors
    /// `Error::InvalidBucketCapacity` if `bucket_capacity` is 0.
    pub fn new(bucket_capacity: usize) -> Result<Self> {
        Self::with_hasher(bucket_capacity, DefaultBuildHasher::default())
    }
}

impl<K, V, S> ExtendibleHashTable<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher,
{
    /// Create a table that addresses keys with `hasher`.
    ///
    /// # Errors
    /// `Error::InvalidBucketCapacity` if `bucket_capacity` is 0.
    pub fn with_hasher(bucket_capacity: usize, hasher: S) -> Result<Self> {
        if bucket_capacity == 0 {
            return Err(Error::InvalidBucketCapacity(bucket_capacity));
        }
        Ok(Self::build(bucket_capacity, hasher))
    }

    fn build(bucket_capacity: usize, hasher: S) -> Self {
        Self {
            inner: Mutex::new(Directory {
                global_depth: 0,
                slots: vec![0],
                buckets: vec![Bucket::new(0, bucket_capacity)],
                len: 0,
            }),
            hasher,
            bucket_capacity,
            stats: HashTableStats::new(),
        }
    }

    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.hasher.hash_one(key)
    }

    // ========================================================================
    // Public API: Lookup and modification
    // ========================================================================

    /// Look up the value stored for `key`.
    pub fn find(&self, key: &K) -> Option<V> {
        let hash = self.hash(key);
        let dir = self.inner.lock();
        HashTableStats::bump(&self.stats.lookups);

        let value = dir.bucket_for(hash).get(hash, key).cloned();
        if value.is_some() {
            HashTableStats::bump(&self.stats.hits);
        }
        value
    }

    /// Remove `key`, returning whether it was present.
    ///
    /// Buckets left empty are kept; nothing is merged or shrunk.
    pub fn remove(&self, key: &K) -> bool {
        let hash = self.hash(key);
        let mut guard = self.inner.lock();
        let dir = &mut *guard;

        let slot = dir.slot_of(hash);
        let removed = dir.buckets[dir.slots[slot]].remove(hash, key);
        if removed {
            dir.len -= 1;
            HashTableStats::bump(&self.stats.removals);
        }
        removed
    }

    /// Insert `key -> value`, overwriting any existing value.
    ///
    /// Splits the addressed bucket (doubling the directory when needed) as
    /// many times as it takes for the key to fit. Always succeeds.
    pub fn insert(&self, key: K, value: V) {
        let hash = self.hash(&key);
        let mut guard = self.inner.lock();
        let dir = &mut *guard;
        HashTableStats::bump(&self.stats.inserts);

        loop {
            let slot = dir.slot_of(hash);
            let bucket_id = dir.slots[slot];
            let bucket = &mut dir.buckets[bucket_id];

            if let Some(existing) = bucket.get_mut(hash, &key) {
                *existing = value;
                return;
            }

            if bucket.len() < self.bucket_capacity {
                bucket.push(hash, key, value);
                dir.len += 1;
                return;
            }

            if bucket.all_hashes_equal(hash) || bucket.local_depth >= MAX_GLOBAL_DEPTH {
                warn!(
                    "bucket at slot {} cannot split further (local depth {}); storing {} entries over capacity {}",
                    slot,
                    bucket.local_depth,
                    bucket.len() + 1,
                    self.bucket_capacity
                );
                bucket.push(hash, key, value);
                dir.len += 1;
                HashTableStats::bump(&self.stats.overflow_inserts);
                return;
            }

            if dir.split(bucket_id) {
                HashTableStats::bump(&self.stats.directory_doublings);
            }
            HashTableStats::bump(&self.stats.splits);
        }
    }

    // ========================================================================
    // Public API: Structural introspection
    // ========================================================================

    /// Number of low-order hash bits used to address the directory.
    pub fn global_depth(&self) -> u32 {
        self.inner.lock().global_depth
    }

    /// Local depth of the bucket that directory slot `slot` points at.
    ///
    /// This is slot-indexed: two slots aliasing one bucket report the same
    /// depth.
    ///
    /// # Errors
    /// `Error::SlotOutOfRange` if `slot >= directory_len()`.
    pub fn local_depth(&self, slot: usize) -> Result<u32> {
        self.inner.lock().bucket_at(slot).map(|b| b.local_depth)
    }

    /// Number of entries in the bucket that directory slot `slot` points at.
    ///
    /// # Errors
    /// `Error::SlotOutOfRange` if `slot >= directory_len()`.
    pub fn bucket_len(&self, slot: usize) -> Result<usize> {
        self.inner.lock().bucket_at(slot).map(|b| b.len())
    }

    /// Number of distinct buckets.
    pub fn bucket_count(&self) -> usize {
        self.inner.lock().buckets.len()
    }

    /// Number of directory slots (always `2^global_depth`).
    pub fn directory_len(&self) -> usize {
        self.inner.lock().slots.len()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum entries per bucket, fixed at construction.
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Operation counters.
    pub fn stats(&self) -> &HashTableStats {
        &self.stats
    }

    /// Check every structural invariant of the directory and its buckets.
    ///
    /// # Errors
    /// `Error::Corrupted` describing the first violation found.
    pub fn verify_integrity(&self) -> Result<()> {
        self.inner.lock().verify(self.bucket_capacity)
    }
}

impl<K, V, S> Default for ExtendibleHashTable<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::build(DEFAULT_BUCKET_CAPACITY, S::default())
    }
}

impl<K, V, S> HashTable<K, V> for ExtendibleHashTable<K, V, S>
where
    K: Hash + Eq + Send,
    V: Clone + Send,
    S: BuildHasher + Send + Sync,
{
    fn find(&self, key: &K) -> Option<V> {
        ExtendibleHashTable::find(self, key)
    }

    fn remove(&self, key: &K) -> bool {
        ExtendibleHashTable::remove(self, key)
    }

    fn insert(&self, key: K, value: V) {
        ExtendibleHashTable::insert(self, key, value)
    }
}

// ============================================================================
// Directory internals (always called with the table lock held)
// ============================================================================

impl<K: Eq, V> Directory<K, V> {
    /// Directory slot addressed by `hash` under the current global depth.
    #[inline]
    fn slot_of(&self, hash: u64) -> usize {
        (hash & low_bits(self.global_depth)) as usize
    }

    #[inline]
    fn bucket_for(&self, hash: u64) -> &Bucket<K, V> {
        &self.buckets[self.slots[self.slot_of(hash)]]
    }

    fn bucket_at(&self, slot: usize) -> Result<&Bucket<K, V>> {
        match self.slots.get(slot) {
            Some(&id) => Ok(&self.buckets[id]),
            None => Err(Error::SlotOutOfRange {
                slot,
                directory_len: self.slots.len(),
            }),
        }
    }

    /// Split bucket `bucket_id` on its next hash bit.
    ///
    /// Returns true if the directory had to double first.
    fn split(&mut self, bucket_id: BucketId) -> bool {
        let mask = 1u64 << self.buckets[bucket_id].local_depth;
        self.buckets[bucket_id].local_depth += 1;
        let local_depth = self.buckets[bucket_id].local_depth;

        let doubled = local_depth > self.global_depth;
        if doubled {
            self.double();
        }

        let mut sibling = self.buckets[bucket_id].split_off(mask, local_depth);
        let sibling_id = self.buckets.len();

        for (slot, id) in self.slots.iter_mut().enumerate() {
            if *id == bucket_id && (slot as u64) & mask != 0 {
                *id = sibling_id;
                sibling.slot_refs += 1;
            }
        }
        self.buckets[bucket_id].slot_refs -= sibling.slot_refs;

        trace!(
            "split bucket {} at local depth {}: {} entries moved to bucket {}, {} stayed",
            bucket_id,
            local_depth,
            sibling.len(),
            sibling_id,
            self.buckets[bucket_id].len()
        );
        self.buckets.push(sibling);

        doubled
    }

    /// Double the directory: slot `i + old_len` aliases slot `i`.
    fn double(&mut self) {
        self.slots.extend_from_within(..);
        for bucket in &mut self.buckets {
            bucket.slot_refs *= 2;
        }
        self.global_depth += 1;

        debug!(
            "directory doubled to {} slots (global depth {})",
            self.slots.len(),
            self.global_depth
        );
    }

    fn verify(&self, bucket_capacity: usize) -> Result<()> {
        let corrupted = |msg: String| -> Result<()> { Err(Error::Corrupted(msg)) };

        if self.slots.len() != 1usize << self.global_depth {
            return corrupted(format!(
                "directory has {} slots at global depth {}",
                self.slots.len(),
                self.global_depth
            ));
        }
        if self.slots.len() > MAX_DIRECTORY_LEN {
            return corrupted(format!(
                "directory has {} slots, limit is {}",
                self.slots.len(),
                MAX_DIRECTORY_LEN
            ));
        }

        let mut refs = vec![0usize; self.buckets.len()];
        for (slot, &id) in self.slots.iter().enumerate() {
            let Some(bucket) = self.buckets.get(id) else {
                return corrupted(format!("slot {} points at missing bucket {}", slot, id));
            };
            refs[id] += 1;

            let mask = low_bits(bucket.local_depth);
            if let Some(entry) = bucket
                .entries()
                .iter()
                .find(|e| e.hash & mask != slot as u64 & mask)
            {
                return corrupted(format!(
                    "slot {} reaches bucket {} holding hash {:#x} outside its low {} bits",
                    slot, id, entry.hash, bucket.local_depth
                ));
            }
        }

        let mut total = 0;
        for (id, bucket) in self.buckets.iter().enumerate() {
            if bucket.local_depth > self.global_depth {
                return corrupted(format!(
                    "bucket {} local depth {} exceeds global depth {}",
                    id, bucket.local_depth, self.global_depth
                ));
            }

            let expected = 1usize << (self.global_depth - bucket.local_depth);
            if refs[id] != expected || bucket.slot_refs != expected {
                return corrupted(format!(
                    "bucket {} referenced by {} slots (recorded {}), expected {}",
                    id, refs[id], bucket.slot_refs, expected
                ));
            }

            if bucket.len() > bucket_capacity {
                let first = bucket.entries()[0].hash;
                let splittable =
                    !bucket.all_hashes_equal(first) && bucket.local_depth < MAX_GLOBAL_DEPTH;
                if splittable {
                    return corrupted(format!(
                        "bucket {} holds {} entries, capacity {}",
                        id,
                        bucket.len(),
                        bucket_capacity
                    ));
                }
            }
            total += bucket.len();
        }

        if total != self.len {
            return corrupted(format!(
                "buckets hold {} entries, table records {}",
                total, self.len
            ));
        }

        Ok(())
    }
}

/// Mask selecting the low `depth` bits of a hash.
#[inline]
fn low_bits(depth: u32) -> u64 {
    (1u64 << depth) - 1
}
