//! bufpool-core - page table and eviction policy for a buffer pool.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Buffer Pool Manager (not in this crate)            │
//! │        pin / unpin / flush, owns frames and disk manager        │
//! └───────────────┬─────────────────────────────────┬───────────────┘
//!                 │ PageId → FrameId                │ evictable frames
//!                 ▼                                 ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────────┐
//! │   Page Table (hash/)          │ │   Replacer (buffer/)          │
//! │   ExtendibleHashTable         │ │   LruReplacer                 │
//! │   directory ──▶ buckets       │ │   LRU ◀── ··· ──▶ MRU         │
//! └───────────────────────────────┘ └───────────────────────────────┘
//! ```
//! The two components are independent: each has its own lock and neither
//! calls the other.
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`hash`] - Extendible hash table
//! - [`buffer`] - Eviction policies
//!
//! # Quick Start
//! ```
//! use bufpool_core::{FrameId, FrameReplacer, PageId, PageTable};
//!
//! let page_table = PageTable::with_hasher(4, Default::default()).unwrap();
//! let replacer = FrameReplacer::new();
//!
//! page_table.insert(PageId::new(7), FrameId::new(0));
//! replacer.insert(FrameId::new(0)); // frame 0 unpinned
//!
//! let victim = replacer.victim().unwrap();
//! assert_eq!(page_table.find(&PageId::new(7)), Some(victim));
//! assert!(page_table.remove(&PageId::new(7)));
//! ```

pub mod buffer;
pub mod common;
pub mod hash;

pub use common::{Error, FrameId, PageId, Result};

pub use buffer::{FrameReplacer, LruReplacer, Replacer};
pub use hash::{ExtendibleHashTable, HashTable, PageTable};
