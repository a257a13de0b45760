//! Heap accounting for the per-invocation memory ceiling
//!
//! The process allocator counts live bytes per thread. An isolate runs on a
//! single thread from engine creation to teardown, so the growth of that
//! thread's counter is what the script holds.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

/// The system allocator plus a per-thread live-byte counter.
pub struct TrackingAllocator;

#[global_allocator]
static ALLOCATOR: TrackingAllocator = TrackingAllocator;

thread_local! {
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

#[inline]
fn adjust(delta: isize) {
    // Fails only while the thread is being torn down.
    let _ = LIVE_BYTES.try_with(|live| live.set(live.get().wrapping_add(delta)));
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            adjust(layout.size() as isize);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            adjust(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        adjust(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            adjust(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }
}

/// Bytes currently allocated by this thread and not yet freed by it.
pub fn live_bytes() -> isize {
    LIVE_BYTES.try_with(Cell::get).unwrap_or(0)
}

/// Heap growth on the current thread measured from a starting point.
#[derive(Debug, Clone, Copy)]
pub struct MemoryBudget {
    baseline: isize,
    limit: usize,
}

impl MemoryBudget {
    pub fn start(limit: usize) -> Self {
        Self {
            baseline: live_bytes(),
            limit,
        }
    }

    pub fn used(&self) -> usize {
        (live_bytes() - self.baseline).max(0) as usize
    }

    pub fn exceeded(&self) -> bool {
        self.used() > self.limit
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
