//! Process memory and thread metrics.
//!
//! Heap numbers come from [`CountingAllocator`], which the binary installs
//! as its global allocator. Resident memory and thread count are read from
//! `/proc/self/status` and report 0 where that file does not exist.

use hub_types::MemStats;
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

static LIVE_BYTES: AtomicU64 = AtomicU64::new(0);
static TOTAL_BYTES: AtomicU64 = AtomicU64::new(0);

/// System allocator wrapper that counts live and cumulative heap bytes
pub struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        LIVE_BYTES.fetch_sub(layout.size() as u64, Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            LIVE_BYTES.fetch_sub(layout.size() as u64, Ordering::Relaxed);
            record_alloc(new_size);
        }
        new_ptr
    }
}

fn record_alloc(size: usize) {
    LIVE_BYTES.fetch_add(size as u64, Ordering::Relaxed);
    TOTAL_BYTES.fetch_add(size as u64, Ordering::Relaxed);
}

/// Pull `VmRSS` (bytes) and `Threads` out of a /proc status document
fn parse_proc_status(status: &str) -> (u64, u64) {
    let mut rss = 0;
    let mut threads = 0;
    for line in status.lines() {
        if let Some(value) = line.strip_prefix("VmRSS:") {
            let kb = value.trim().trim_end_matches("kB").trim();
            rss = kb.parse::<u64>().unwrap_or(0) * 1024;
        } else if let Some(value) = line.strip_prefix("Threads:") {
            threads = value.trim().parse().unwrap_or(0);
        }
    }
    (rss, threads)
}

pub fn snapshot() -> MemStats {
    let (sys, num_threads) = std::fs::read_to_string("/proc/self/status")
        .map(|s| parse_proc_status(&s))
        .unwrap_or((0, 0));

    MemStats {
        alloc: LIVE_BYTES.load(Ordering::Relaxed),
        total_alloc: TOTAL_BYTES.load(Ordering::Relaxed),
        sys,
        num_threads,
    }
}
