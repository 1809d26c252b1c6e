//! Logical page identifier, the key type of the page table.

use std::fmt;

/// Identifies a logical page owned by the storage engine.
///
/// This is the key of [`PageTable`](crate::hash::PageTable). It derives
/// `Hash` by delegating to the inner `u32`, so under
/// [`BuildIdentityHasher`](crate::hash::BuildIdentityHasher) a page's
/// directory slot is simply the low bits of its number.
///
/// # Example
/// ```
/// use bufpool_core::PageId;
///
/// let page_id = PageId::new(42);
/// assert!(page_id.is_valid());
/// assert_eq!(u32::from(page_id), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Sentinel for "no page".
    pub const INVALID: PageId = PageId(u32::MAX);

    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }

    /// Whether this is a real page (not [`PageId::INVALID`]).
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        PageId(id)
    }
}

impl From<PageId> for u32 {
    fn from(page_id: PageId) -> Self {
        page_id.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Page({})", self.0)
        } else {
            write!(f, "Page(INVALID)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::BuildIdentityHasher;
    use std::hash::BuildHasher;

    #[test]
    fn test_page_id_conversions() {
        let pid: PageId = 7u32.into();
        assert_eq!(pid, PageId::new(7));
        assert_eq!(u32::from(pid), 7);
        assert!(!PageId::INVALID.is_valid());
    }

    #[test]
    fn test_page_id_identity_hash() {
        // Slot addressing in tests relies on this.
        let hasher = BuildIdentityHasher::default();
        assert_eq!(hasher.hash_one(PageId::new(5)), 5);
        assert_eq!(hasher.hash_one(PageId::new(1024)), 1024);
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(format!("{}", PageId::new(42)), "Page(42)");
        assert_eq!(format!("{}", PageId::INVALID), "Page(INVALID)");
    }
}
