// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Budgeted, recycling allocation strategy.
//!
//! A [`MemoryPool`] enforces a hard byte ceiling and keeps returned buffers
//! on a free list binned by power-of-two size class, so that storages which
//! are created and released in a loop stop hitting the global heap.
//!
//! The pool handle is cheap to clone: every clone, and every [`RawBuffer`]
//! it hands out, shares one `Arc<PoolInner>`.

use crate::{AllocationStats, Allocator, MemoryBudget, MemoryError, RawBuffer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Smallest size class. Requests below it share one bin.
const MIN_SIZE_CLASS: usize = 4096;

/// State shared between the pool handle and the buffers it handed out.
pub(crate) struct PoolInner {
    budget: MemoryBudget,
    live_bytes: AtomicUsize,
    /// size class -> recycled vectors (capacity >= class).
    free_buffers: Mutex<HashMap<usize, Vec<Vec<u8>>>>,
    free_list_bytes: AtomicUsize,
    stats: Mutex<AllocationStats>,
}

impl PoolInner {
    /// Called from `RawBuffer::drop`.
    pub(crate) fn return_buffer(&self, buffer: Vec<u8>) {
        self.live_bytes.fetch_sub(buffer.len(), Ordering::AcqRel);
        if let Ok(mut stats) = self.stats.lock() {
            stats.returned += 1;
        }

        let class = size_class_for(buffer.len());
        self.free_list_bytes
            .fetch_add(buffer.capacity(), Ordering::AcqRel);
        if let Ok(mut free) = self.free_buffers.lock() {
            free.entry(class).or_default().push(buffer);
        }
    }

    /// Atomically reserves `nbytes` against the budget.
    fn reserve(&self, nbytes: usize) -> Result<usize, MemoryError> {
        let budget = self.budget.as_bytes();
        self.live_bytes
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                live.checked_add(nbytes).filter(|&next| next <= budget)
            })
            .map(|previous| previous + nbytes)
            .map_err(|live| MemoryError::OutOfMemory {
                requested_bytes: nbytes,
                available_bytes: budget.saturating_sub(live),
                budget_bytes: budget,
            })
    }

    fn take_recycled(&self, nbytes: usize) -> Option<Vec<u8>> {
        let class = size_class_for(nbytes);
        let mut free = self.free_buffers.lock().ok()?;
        let mut buf = free.get_mut(&class)?.pop()?;
        self.free_list_bytes
            .fetch_sub(buf.capacity(), Ordering::AcqRel);
        buf.clear();
        buf.resize(nbytes, 0);
        Some(buf)
    }
}

/// A budget-enforcing allocator that recycles returned buffers.
///
/// ```
/// use memory_manager::{Allocator, MemoryBudget, MemoryPool};
///
/// let pool = MemoryPool::new(MemoryBudget::from_mb(1));
/// let buf = pool.allocate(1024).unwrap();
/// assert_eq!(pool.live_bytes(), 1024);
/// drop(buf);
/// assert_eq!(pool.live_bytes(), 0);
/// ```
#[derive(Clone)]
pub struct MemoryPool {
    inner: Arc<PoolInner>,
}

impl MemoryPool {
    pub fn new(budget: MemoryBudget) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                budget,
                live_bytes: AtomicUsize::new(0),
                free_buffers: Mutex::new(HashMap::new()),
                free_list_bytes: AtomicUsize::new(0),
                stats: Mutex::new(AllocationStats::default()),
            }),
        }
    }

    /// Bytes currently handed out and not yet returned.
    pub fn live_bytes(&self) -> usize {
        self.inner.live_bytes.load(Ordering::Acquire)
    }

    pub fn available_bytes(&self) -> usize {
        self.inner.budget.as_bytes().saturating_sub(self.live_bytes())
    }

    pub fn budget(&self) -> MemoryBudget {
        self.inner.budget
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> AllocationStats {
        self.inner
            .stats
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Capacity held on the free list, in bytes.
    pub fn free_list_bytes(&self) -> usize {
        self.inner.free_list_bytes.load(Ordering::Acquire)
    }

    /// Drops every cached buffer. Live buffers are unaffected.
    pub fn shrink(&self) {
        if let Ok(mut free) = self.inner.free_buffers.lock() {
            free.clear();
            self.inner.free_list_bytes.store(0, Ordering::Release);
        }
        tracing::debug!("memory pool free list cleared");
    }
}

impl Allocator for MemoryPool {
    fn allocate(&self, nbytes: usize) -> Result<RawBuffer, MemoryError> {
        if nbytes == 0 {
            if let Ok(mut stats) = self.inner.stats.lock() {
                stats.zero_sized += 1;
            }
            return Ok(RawBuffer::empty());
        }

        let live = match self.inner.reserve(nbytes) {
            Ok(live) => live,
            Err(err) => {
                if let Ok(mut stats) = self.inner.stats.lock() {
                    stats.rejected += 1;
                }
                tracing::warn!("memory pool rejected allocation: {err}");
                return Err(err);
            }
        };

        let recycled = self.inner.take_recycled(nbytes);
        if let Ok(mut stats) = self.inner.stats.lock() {
            if recycled.is_some() {
                stats.reused += 1;
            } else {
                stats.fresh += 1;
            }
            stats.observe_live(live);
        }

        let data = recycled.unwrap_or_else(|| vec![0u8; nbytes]);
        Ok(RawBuffer::pooled(data, Arc::clone(&self.inner)))
    }

    fn name(&self) -> &'static str {
        "pool"
    }

    fn stats(&self) -> Option<AllocationStats> {
        Some(MemoryPool::stats(self))
    }
}

fn size_class_for(size: usize) -> usize {
    size.max(MIN_SIZE_CLASS).next_power_of_two()
}

impl std::fmt::Debug for MemoryPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPool")
            .field("budget", &self.inner.budget)
            .field("live_bytes", &self.live_bytes())
            .field("available_bytes", &self.available_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_drop() {
        let pool = MemoryPool::new(MemoryBudget::from_mb(1));
        let buf = pool.allocate(1024).unwrap();
        assert_eq!(buf.len(), 1024);
        assert!(buf.is_pooled());
        assert_eq!(pool.live_bytes(), 1024);

        drop(buf);
        assert_eq!(pool.live_bytes(), 0);
        assert_eq!(pool.stats().returned, 1);
    }

    #[test]
    fn test_zero_bytes_bypass_pool() {
        let pool = MemoryPool::new(MemoryBudget::from_bytes(16));
        let buf = pool.allocate(0).unwrap();
        assert!(buf.is_empty());
        assert!(!buf.is_pooled());
        drop(buf);

        let stats = pool.stats();
        assert_eq!(stats.zero_sized, 1);
        assert_eq!(stats.returned, 0);
        assert_eq!(pool.live_bytes(), 0);
    }

    #[test]
    fn test_budget_exhaustion() {
        let pool = MemoryPool::new(MemoryBudget::from_bytes(1024));
        let _a = pool.allocate(600).unwrap();
        let err = pool.allocate(600).unwrap_err();
        assert!(matches!(
            err,
            MemoryError::OutOfMemory {
                requested_bytes: 600,
                available_bytes: 424,
                budget_bytes: 1024,
            }
        ));
        assert_eq!(pool.stats().rejected, 1);
        assert_eq!(pool.live_bytes(), 600);
    }

    #[test]
    fn test_recycled_buffer_is_zeroed_and_resized() {
        let pool = MemoryPool::new(MemoryBudget::from_mb(1));
        let mut first = pool.allocate(3000).unwrap();
        first.as_mut_slice().fill(0xAB);
        drop(first);
        assert!(pool.free_list_bytes() >= 3000);

        let second = pool.allocate(2000).unwrap();
        assert_eq!(second.len(), 2000);
        assert!(second.as_slice().iter().all(|&b| b == 0));

        let stats = pool.stats();
        assert_eq!(stats.reused, 1);
        assert_eq!(stats.fresh, 1);
        assert_eq!(pool.free_list_bytes(), 0);
    }

    #[test]
    fn test_peak_survives_release() {
        let pool = MemoryPool::new(MemoryBudget::from_mb(1));
        let a = pool.allocate(1000).unwrap();
        let b = pool.allocate(2000).unwrap();
        drop(a);
        drop(b);
        assert_eq!(pool.stats().peak_bytes, 3000);
    }

    #[test]
    fn test_clones_share_state() {
        let pool = MemoryPool::new(MemoryBudget::from_mb(1));
        let other = pool.clone();
        let _buf = other.allocate(512).unwrap();
        assert_eq!(pool.live_bytes(), 512);
    }

    #[test]
    fn test_shrink() {
        let pool = MemoryPool::new(MemoryBudget::from_mb(1));
        drop(pool.allocate(8192).unwrap());
        assert!(pool.free_list_bytes() > 0);
        pool.shrink();
        assert_eq!(pool.free_list_bytes(), 0);
    }

    #[test]
    fn test_size_class() {
        assert_eq!(size_class_for(1), MIN_SIZE_CLASS);
        assert_eq!(size_class_for(4096), 4096);
        assert_eq!(size_class_for(5000), 8192);
    }

    #[test]
    fn test_debug_format() {
        let debug = format!("{:?}", MemoryPool::new(MemoryBudget::from_mb(2)));
        assert!(debug.contains("MemoryPool"));
        assert!(debug.contains("live_bytes"));
    }
}
