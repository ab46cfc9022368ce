// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memory-manager
//!
//! Allocation strategies for tensor storage.
//!
//! # Key Components
//!
//! - [`Allocator`]: the strategy seam. Hands out N zeroed bytes.
//! - [`HeapAllocator`]: unbudgeted global-heap allocation.
//! - [`MemoryPool`]: a budget-enforced allocator that recycles returned
//!   buffers through a free list binned by size class.
//! - [`RawBuffer`]: an owned byte buffer. Pool buffers find their own way
//!   back to the pool when dropped.
//! - [`MemoryBudget`] / [`AllocationStats`]: pool ceiling and counters.
//! - [`AllocatorConfig`]: TOML-driven strategy selection.
//!
//! # Ownership Model
//!
//! ```text
//! Allocator::allocate(n)
//!       │
//!       ▼
//!   RawBuffer  ◄─── owns Vec<u8>, optionally holds Arc<PoolInner>
//!       │
//!       │  drop()
//!       ▼
//!   PoolInner::return_buffer()  ──► free list   (pool buffers only)
//! ```
//!
//! # Example
//! ```
//! use memory_manager::{Allocator, MemoryBudget, MemoryPool};
//!
//! let pool = MemoryPool::new(MemoryBudget::from_mb(4));
//! let a = pool.allocate(1024).unwrap();
//! let b = pool.allocate(512).unwrap();
//! assert_eq!(pool.live_bytes(), 1536);
//!
//! drop(a);
//! assert_eq!(pool.live_bytes(), 512);
//! # drop(b);
//! ```

mod alloc;
mod budget;
mod buffer;
mod config;
mod error;
mod pool;
mod stats;

pub use alloc::{Allocator, HeapAllocator};
pub use budget::MemoryBudget;
pub use buffer::RawBuffer;
pub use config::AllocatorConfig;
pub use error::MemoryError;
pub use pool::MemoryPool;
pub use stats::AllocationStats;
