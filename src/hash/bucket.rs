//! Bucket - a fixed-capacity group of entries addressed by one or more
//! directory slots.

/// One key/value pair plus the full hash of its key.
///
/// Caching the hash lets a split redistribute entries on one more hash bit
/// without rehashing every key.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A bucket of the extendible hash table.
///
/// # Invariants (checked by `ExtendibleHashTable::verify_integrity`)
/// - `local_depth <= global_depth`
/// - exactly `slot_refs == 2^(global_depth - local_depth)` directory slots
///   point here
/// - every entry's hash agrees with those slots on the low `local_depth` bits
#[derive(Debug)]
pub(crate) struct Bucket<K, V> {
    /// Number of low-order hash bits shared by every key in this bucket.
    pub(crate) local_depth: u32,

    /// Number of directory slots referencing this bucket.
    pub(crate) slot_refs: usize,

    /// Unordered entries. Scanned linearly; buckets are small.
    entries: Vec<Entry<K, V>>,
}

impl<K: Eq, V> Bucket<K, V> {
    /// Create an empty bucket referenced by a single slot.
    pub(crate) fn new(local_depth: u32, capacity: usize) -> Self {
        Self {
            local_depth,
            slot_refs: 1,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Create the sibling produced by a split. Its slot references are
    /// counted by the caller while reassigning directory slots.
    fn sibling(local_depth: u32, entries: Vec<Entry<K, V>>) -> Self {
        Self {
            local_depth,
            slot_refs: 0,
            entries,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    fn position(&self, hash: u64, key: &K) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.hash == hash && e.key == *key)
    }

    pub(crate) fn get(&self, hash: u64, key: &K) -> Option<&V> {
        self.position(hash, key).map(|i| &self.entries[i].value)
    }

    pub(crate) fn get_mut(&mut self, hash: u64, key: &K) -> Option<&mut V> {
        match self.position(hash, key) {
            Some(i) => Some(&mut self.entries[i].value),
            None => None,
        }
    }

    /// Append an entry. The caller has already checked the key is absent.
    pub(crate) fn push(&mut self, hash: u64, key: K, value: V) {
        self.entries.push(Entry { hash, key, value });
    }

    pub(crate) fn remove(&mut self, hash: u64, key: &K) -> bool {
        match self.position(hash, key) {
            Some(i) => {
                self.entries.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Whether every entry hashes exactly to `hash`.
    ///
    /// If so, adding another key with that hash can never be resolved by
    /// splitting: all of them agree on every bit.
    pub(crate) fn all_hashes_equal(&self, hash: u64) -> bool {
        self.entries.iter().all(|e| e.hash == hash)
    }

    /// Move every entry whose hash has `mask` set into a new sibling bucket
    /// of depth `local_depth`. Entries without the bit stay here.
    pub(crate) fn split_off(&mut self, mask: u64, local_depth: u32) -> Bucket<K, V> {
        let (moved, kept): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|e| e.hash & mask != 0);
        self.entries = kept;
        Bucket::sibling(local_depth, moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_with(hashes: &[u64]) -> Bucket<u64, String> {
        let mut bucket = Bucket::new(0, hashes.len());
        for &h in hashes {
            bucket.push(h, h, format!("v{}", h));
        }
        bucket
    }

    #[test]
    fn test_bucket_get_and_overwrite() {
        let mut bucket = bucket_with(&[1, 2]);

        assert_eq!(bucket.get(1, &1).map(String::as_str), Some("v1"));
        assert!(bucket.get(3, &3).is_none());

        *bucket.get_mut(2, &2).unwrap() = "two".to_string();
        assert_eq!(bucket.get(2, &2).map(String::as_str), Some("two"));
        assert_eq!(bucket.len(), 2);
    }

    #[test]
    fn test_bucket_lookup_requires_matching_hash() {
        let bucket = bucket_with(&[4]);
        // Same key, different cached hash: not the same entry.
        assert!(bucket.get(5, &4).is_none());
    }

    #[test]
    fn test_bucket_remove() {
        let mut bucket = bucket_with(&[1, 2, 3]);

        assert!(bucket.remove(2, &2));
        assert!(!bucket.remove(2, &2));
        assert_eq!(bucket.len(), 2);
        assert!(bucket.get(1, &1).is_some());
        assert!(bucket.get(3, &3).is_some());
    }

    #[test]
    fn test_bucket_split_off_partitions_on_mask() {
        let mut bucket = bucket_with(&[0b00, 0b01, 0b10, 0b11]);

        let sibling = bucket.split_off(0b01, 1);

        assert_eq!(sibling.local_depth, 1);
        assert_eq!(sibling.slot_refs, 0);
        let mut moved: Vec<u64> = sibling.entries().iter().map(|e| e.hash).collect();
        moved.sort_unstable();
        assert_eq!(moved, vec![0b01, 0b11]);

        let mut kept: Vec<u64> = bucket.entries().iter().map(|e| e.hash).collect();
        kept.sort_unstable();
        assert_eq!(kept, vec![0b00, 0b10]);
    }

    #[test]
    fn test_bucket_all_hashes_equal() {
        assert!(bucket_with(&[]).all_hashes_equal(9));
        assert!(bucket_with(&[9, 9]).all_hashes_equal(9));
        assert!(!bucket_with(&[9, 8]).all_hashes_equal(9));
    }
}
