//! Error types for the page table and replacer.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors this crate can report.
///
/// Absence is never an error: lookups and evictions return `Option`/`bool`.
/// These variants cover misconfiguration and diagnostic misuse only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A hash table was constructed with a bucket capacity of zero.
    ///
    /// With capacity 0 an insert could never find room in a bucket, however
    /// many times it split.
    #[error("invalid bucket capacity {0}: must be at least 1")]
    InvalidBucketCapacity(usize),

    /// A diagnostic accessor was given a directory slot that does not exist.
    #[error("directory slot {slot} out of range (directory length {directory_len})")]
    SlotOutOfRange { slot: usize, directory_len: usize },

    /// An internal structural invariant does not hold.
    ///
    /// This indicates a bug in the hash table, not a caller error.
    #[error("hash table corrupted: {0}")]
    Corrupted(String),
}
