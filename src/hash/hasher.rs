//! Identity hashing for integer-like keys.
//!
//! The page table addresses its directory with the low-order bits of a key's
//! hash. With [`BuildIdentityHasher`] an integer key hashes to itself, so
//! page `n` lands in slot `n & (directory_len - 1)`. That makes directory
//! layout predictable, which diagnostics and tests rely on, and it spreads
//! densely allocated page numbers perfectly across buckets.

use std::hash::{BuildHasherDefault, Hasher};

/// Multiplier used to fold successive writes together.
const FOLD_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A [`Hasher`] that returns a single integer write unchanged.
///
/// Multiple writes (tuples, strings, byte slices) are folded together, so the
/// hasher stays usable for any key, but only single-integer keys get the
/// identity mapping.
///
/// # Example
/// ```
/// use bufpool_core::hash::BuildIdentityHasher;
/// use std::hash::BuildHasher;
///
/// let build = BuildIdentityHasher::default();
/// assert_eq!(build.hash_one(42u32), 42);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher {
    hash: u64,
}

impl IdentityHasher {
    #[inline]
    fn fold(&mut self, n: u64) {
        // With a zero state this is exactly `n`.
        self.hash = self.hash.wrapping_mul(FOLD_PRIME) ^ n;
    }
}

impl Hasher for IdentityHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.fold(u64::from(b));
        }
    }

    #[inline]
    fn write_u8(&mut self, n: u8) {
        self.fold(u64::from(n));
    }

    #[inline]
    fn write_u16(&mut self, n: u16) {
        self.fold(u64::from(n));
    }

    #[inline]
    fn write_u32(&mut self, n: u32) {
        self.fold(u64::from(n));
    }

    #[inline]
    fn write_u64(&mut self, n: u64) {
        self.fold(n);
    }

    #[inline]
    fn write_usize(&mut self, n: usize) {
        self.fold(n as u64);
    }
}

/// Builds [`IdentityHasher`]s.
pub type BuildIdentityHasher = BuildHasherDefault<IdentityHasher>;
