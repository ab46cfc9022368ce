// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The allocation-strategy seam consumed by tensor storage.

use crate::{AllocationStats, MemoryError, RawBuffer};

/// An allocation strategy: hands out zeroed byte buffers of a requested size.
///
/// Storage handles keep an `Arc<dyn Allocator>` so a buffer can be replaced
/// (e.g. on resize) through the same strategy that produced it.
pub trait Allocator: Send + Sync {
    /// Allocates `nbytes` zeroed bytes. A request for zero bytes must succeed
    /// with an empty buffer.
    fn allocate(&self, nbytes: usize) -> Result<RawBuffer, MemoryError>;

    /// Short, stable name of the strategy (used in logs and diagnostics).
    fn name(&self) -> &'static str;

    /// Counters for strategies that keep them. `None` by default.
    fn stats(&self) -> Option<AllocationStats> {
        None
    }
}

/// Plain global-heap allocation with no budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl Allocator for HeapAllocator {
    fn allocate(&self, nbytes: usize) -> Result<RawBuffer, MemoryError> {
        if nbytes == 0 {
            return Ok(RawBuffer::empty());
        }
        Ok(RawBuffer::from_vec(vec![0u8; nbytes]))
    }

    fn name(&self) -> &'static str {
        "heap"
    }
}
