//! Integration tests composing the page table and the replacer the way a
//! buffer pool manager does.
//!
//! `MiniPool` keeps only pin counts and a free list; the page table maps
//! resident pages to frames and the replacer holds unpinned frames.

use bufpool_core::hash::BuildIdentityHasher;
use bufpool_core::{FrameId, FrameReplacer, PageId, PageTable};
use std::sync::Arc;
use std::thread;

struct MiniPool {
    page_table: PageTable,
    replacer: FrameReplacer,
    /// Page held by each frame and its pin count.
    frames: Vec<Option<(PageId, u32)>>,
    free_list: Vec<FrameId>,
}

impl MiniPool {
    fn new(pool_size: usize) -> Self {
        Self {
            page_table: PageTable::with_hasher(2, BuildIdentityHasher::default()).unwrap(),
            replacer: FrameReplacer::new(),
            frames: vec![None; pool_size],
            free_list: (0..pool_size).rev().map(FrameId::new).collect(),
        }
    }

    /// Pin `page_id`, loading it into a frame if needed. `None` if every
    /// frame is pinned.
    fn fetch(&mut self, page_id: PageId) -> Option<FrameId> {
        if let Some(frame_id) = self.page_table.find(&page_id) {
            let slot = self.frames[frame_id.index()].as_mut()?;
            slot.1 += 1;
            self.replacer.erase(&frame_id);
            return Some(frame_id);
        }

        let frame_id = match self.free_list.pop() {
            Some(fid) => fid,
            None => {
                let victim = self.replacer.victim()?;
                if let Some((old_page, _)) = self.frames[victim.index()].take() {
                    assert!(self.page_table.remove(&old_page));
                }
                victim
            }
        };

        self.frames[frame_id.index()] = Some((page_id, 1));
        self.page_table.insert(page_id, frame_id);
        Some(frame_id)
    }

    fn unpin(&mut self, page_id: PageId) {
        let frame_id = self.page_table.find(&page_id).expect("page not resident");
        let slot = self.frames[frame_id.index()]
            .as_mut()
            .expect("frame empty");
        slot.1 -= 1;
        if slot.1 == 0 {
            self.replacer.insert(frame_id);
        }
    }

    fn is_resident(&self, page_id: PageId) -> bool {
        self.page_table.find(&page_id).is_some()
    }
}

/// Unpinned pages are evicted least-recently-unpinned first.
#[test]
fn test_eviction_follows_lru_order() {
    let mut pool = MiniPool::new(3);
    for p in 0..3 {
        pool.fetch(PageId::new(p)).unwrap();
    }
    pool.unpin(PageId::new(1));
    pool.unpin(PageId::new(0));
    pool.unpin(PageId::new(2));

    // Page 1 was unpinned first, so its frame is reused.
    pool.fetch(PageId::new(10)).unwrap();
    assert!(!pool.is_resident(PageId::new(1)));
    assert!(pool.is_resident(PageId::new(0)));
    assert!(pool.is_resident(PageId::new(2)));

    pool.fetch(PageId::new(11)).unwrap();
    assert!(!pool.is_resident(PageId::new(0)));
}

/// Re-pinning a page removes its frame from the eviction candidates.
#[test]
fn test_pinned_pages_are_never_evicted() {
    let mut pool = MiniPool::new(2);
    let f0 = pool.fetch(PageId::new(0)).unwrap();
    pool.fetch(PageId::new(1)).unwrap();
    pool.unpin(PageId::new(0));

    // Hit on page 0 pins it again.
    assert_eq!(pool.fetch(PageId::new(0)), Some(f0));
    assert_eq!(pool.replacer.size(), 0);

    // Both frames pinned: nothing can be loaded.
    assert_eq!(pool.fetch(PageId::new(2)), None);
    assert!(pool.is_resident(PageId::new(0)));
    assert!(pool.is_resident(PageId::new(1)));
}

/// Churn many pages through a small pool; the page table must always map
/// exactly the resident pages.
#[test]
fn test_page_table_tracks_residency_under_churn() {
    let mut pool = MiniPool::new(4);
    for p in 0..200u32 {
        let pid = PageId::new(p % 37);
        pool.fetch(pid).unwrap();
        pool.unpin(pid);
    }

    let resident: Vec<PageId> = pool.frames.iter().flatten().map(|(pid, _)| *pid).collect();
    assert_eq!(resident.len(), 4);
    assert_eq!(pool.page_table.len(), 4);
    for pid in resident {
        let frame_id = pool.page_table.find(&pid).unwrap();
        assert_eq!(pool.frames[frame_id.index()].map(|(p, _)| p), Some(pid));
    }
    assert_eq!(pool.replacer.size(), 4);
    pool.page_table.verify_integrity().unwrap();
}

/// The page table and the replacer are independent instances and can be
/// driven from different threads at once.
#[test]
fn test_components_operate_concurrently() {
    let page_table = Arc::new(PageTable::with_hasher(4, BuildIdentityHasher::default()).unwrap());
    let replacer = Arc::new(FrameReplacer::new());

    let pt = Arc::clone(&page_table);
    let table_worker = thread::spawn(move || {
        for i in 0..2000u32 {
            pt.insert(PageId::new(i), FrameId::new(i as usize));
        }
    });

    let rp = Arc::clone(&replacer);
    let replacer_worker = thread::spawn(move || {
        for i in 0..2000usize {
            rp.insert(FrameId::new(i % 100));
        }
    });

    table_worker.join().unwrap();
    replacer_worker.join().unwrap();

    assert_eq!(page_table.len(), 2000);
    assert_eq!(replacer.size(), 100);
    // Last touches were 1900..2000, i.e. frames 0..100 in order.
    assert_eq!(replacer.victim(), Some(FrameId::new(0)));
}
