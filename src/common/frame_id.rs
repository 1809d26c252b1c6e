//! Buffer frame identifier, the value type of the page table and the
//! element type of the frame replacer.

use std::fmt;

/// Identifies a frame (an in-memory page slot) in the buffer pool.
///
/// `usize` so the owning pool can index its frame array directly.
///
/// # Example
/// ```
/// use bufpool_core::FrameId;
///
/// let frame_id = FrameId::new(5);
/// assert_eq!(frame_id.index(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl FrameId {
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// Position of this frame in the pool's frame array.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for FrameId {
    fn from(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
