//! Buffer pool building blocks.
//!
//! The buffer pool manager itself lives outside this crate. It resolves
//! pages through a [`PageTable`](crate::hash::PageTable) and chooses frames
//! to reclaim through a [`FrameReplacer`].
//!
//! # Components
//! - [`replacer`] - Eviction policy implementations

pub mod replacer;

use crate::common::FrameId;

pub use replacer::{LruReplacer, Replacer};

/// The buffer pool's eviction policy over its frames.
pub type FrameReplacer = LruReplacer<FrameId>;
