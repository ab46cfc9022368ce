// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned byte buffers handed out by allocators.
//!
//! A [`RawBuffer`] owns its bytes exclusively. When the buffer came from a
//! [`MemoryPool`](crate::MemoryPool) it keeps a handle back to the pool and
//! returns its bytes to the free list on drop; heap buffers are simply freed.

use crate::pool::PoolInner;
use std::sync::Arc;

/// An owned, zero-initialised byte buffer.
pub struct RawBuffer {
    data: Vec<u8>,
    /// Set when the bytes must be handed back to a pool on drop.
    origin: Option<Arc<PoolInner>>,
}

impl RawBuffer {
    /// A zero-length buffer that owns no heap memory.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            origin: None,
        }
    }

    /// Wraps an existing vector. The bytes are freed normally on drop.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, origin: None }
    }

    pub(crate) fn pooled(data: Vec<u8>, pool: Arc<PoolInner>) -> Self {
        Self {
            data,
            origin: Some(pool),
        }
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if dropping this buffer hands its bytes back to a pool.
    pub fn is_pooled(&self) -> bool {
        self.origin.is_some()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        if let Some(pool) = self.origin.take() {
            pool.return_buffer(std::mem::take(&mut self.data));
        }
    }
}

impl std::fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawBuffer")
            .field("len", &self.data.len())
            .field("pooled", &self.origin.is_some())
            .finish()
    }
}
