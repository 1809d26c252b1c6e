//! Configuration constants for the page table.

/// Bucket capacity used by `ExtendibleHashTable::default()`.
///
/// Buckets are scanned linearly, so this stays small enough that a bucket
/// fits in a handful of cache lines for `PageId -> FrameId` entries.
pub const DEFAULT_BUCKET_CAPACITY: usize = 16;

/// Ceiling on the directory's global depth.
///
/// The directory holds `2^global_depth` slots. A split that would grow it
/// past `2^MAX_GLOBAL_DEPTH` slots is refused and the entry overflows its
/// bucket instead.
///
/// # Memory
/// At the ceiling the directory is 2^24 slots × 8 bytes = 128MB.
pub const MAX_GLOBAL_DEPTH: u32 = 24;

/// Maximum number of directory slots.
pub const MAX_DIRECTORY_LEN: usize = 1 << MAX_GLOBAL_DEPTH;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity_is_positive() {
        assert!(DEFAULT_BUCKET_CAPACITY >= 1);
    }

    #[test]
    fn test_max_directory_len() {
        assert!(MAX_DIRECTORY_LEN.is_power_of_two());
        assert_eq!(MAX_DIRECTORY_LEN, 16 * 1024 * 1024);
        // Depth must fit in the bits of a 64-bit hash.
        assert!(MAX_GLOBAL_DEPTH < u64::BITS);
    }
}
