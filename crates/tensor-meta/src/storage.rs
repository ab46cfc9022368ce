// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared, reference-counted tensor buffers.
//!
//! A [`Storage`] is a cheap handle: cloning it produces another alias of the
//! same bytes, never a copy. Every [`TensorImpl`](crate::TensorImpl) that
//! holds a clone sees writes made through any other. The bytes are freed
//! (or handed back to their pool) when the last handle is dropped.
//!
//! ```text
//!  TensorImpl A ──┐
//!                 ├──► Arc<StorageImpl> ──► RwLock<RawBuffer>
//!  TensorImpl B ──┘         │
//!                           └──► Arc<dyn Allocator>  (used again on resize)
//! ```
//!
//! The lock only makes aliasing expressible in safe Rust. It does not order
//! writes: callers sharing a buffer across threads coordinate themselves.

use crate::{DType, TensorError};
use memory_manager::{Allocator, RawBuffer};
use std::sync::{Arc, PoisonError, RwLock};

struct StorageImpl {
    dtype: DType,
    resizable: bool,
    allocator: Arc<dyn Allocator>,
    data: RwLock<RawBuffer>,
}

impl Drop for StorageImpl {
    fn drop(&mut self) {
        let nbytes = self
            .data
            .get_mut()
            .map(|buf| buf.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len());
        tracing::debug!(
            dtype = %self.dtype,
            nbytes,
            allocator = self.allocator.name(),
            "storage freed"
        );
    }
}

/// A shared handle to a typed byte buffer.
#[derive(Clone)]
pub struct Storage {
    inner: Arc<StorageImpl>,
}

impl Storage {
    /// Allocates room for `numel` elements of `dtype` through `allocator`.
    pub fn new(
        dtype: DType,
        numel: usize,
        allocator: Arc<dyn Allocator>,
        resizable: bool,
    ) -> Result<Self, TensorError> {
        let nbytes = byte_len(dtype, numel)?;
        let buffer = allocator.allocate(nbytes).map_err(|e| {
            tracing::warn!(%dtype, numel, allocator = allocator.name(), "storage allocation failed: {e}");
            e
        })?;
        tracing::debug!(%dtype, nbytes, allocator = allocator.name(), "storage allocated");
        Ok(Self::from_raw(dtype, buffer, allocator, resizable))
    }

    /// A zero-length, resizable storage.
    pub fn empty(dtype: DType, allocator: Arc<dyn Allocator>) -> Result<Self, TensorError> {
        Self::new(dtype, 0, allocator, true)
    }

    /// Adopts an already allocated buffer. `allocator` is used for later resizes.
    pub fn from_raw(
        dtype: DType,
        buffer: RawBuffer,
        allocator: Arc<dyn Allocator>,
        resizable: bool,
    ) -> Self {
        Self {
            inner: Arc::new(StorageImpl {
                dtype,
                resizable,
                allocator,
                data: RwLock::new(buffer),
            }),
        }
    }

    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    pub fn is_resizable(&self) -> bool {
        self.inner.resizable
    }

    pub fn allocator_name(&self) -> &'static str {
        self.inner.allocator.name()
    }

    /// Size of the buffer in bytes.
    pub fn nbytes(&self) -> usize {
        self.with_bytes(<[u8]>::len)
    }

    /// Number of whole elements of [`Storage::dtype`] in the buffer.
    pub fn numel(&self) -> usize {
        match self.dtype().size_bytes() {
            0 => 0,
            item => self.nbytes() / item,
        }
    }

    /// Number of live handles aliasing this buffer.
    pub fn use_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns `true` if both handles refer to the same buffer.
    pub fn is_alias_of(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Runs `f` over the raw bytes.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let guard = self.inner.data.read().unwrap_or_else(PoisonError::into_inner);
        f(guard.as_slice())
    }

    /// Runs `f` over the raw bytes mutably. Visible through every alias.
    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut guard = self
            .inner
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(guard.as_mut_slice())
    }

    /// Reads element `index` of an `F32` storage.
    pub fn read_f32(&self, index: usize) -> Result<f32, TensorError> {
        let range = self.f32_range(index)?;
        Ok(self.with_bytes(|bytes| {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&bytes[range]);
            f32::from_ne_bytes(raw)
        }))
    }

    /// Writes element `index` of an `F32` storage.
    pub fn write_f32(&self, index: usize, value: f32) -> Result<(), TensorError> {
        let range = self.f32_range(index)?;
        self.with_bytes_mut(|bytes| bytes[range].copy_from_slice(&value.to_ne_bytes()));
        Ok(())
    }

    fn f32_range(&self, index: usize) -> Result<std::ops::Range<usize>, TensorError> {
        if self.dtype() != DType::F32 {
            return Err(TensorError::DTypeMismatch {
                expected: DType::F32,
                actual: self.dtype(),
            });
        }
        let numel = self.numel();
        if index >= numel {
            return Err(TensorError::IndexOutOfBounds { index, numel });
        }
        let start = index * 4;
        Ok(start..start + 4)
    }

    /// Reallocates the buffer to hold `numel` elements, keeping the common
    /// prefix. Every alias sees the new buffer.
    pub fn resize(&self, numel: usize) -> Result<(), TensorError> {
        if !self.inner.resizable {
            return Err(TensorError::NotResizable);
        }
        let nbytes = byte_len(self.dtype(), numel)?;
        let mut fresh = self.inner.allocator.allocate(nbytes)?;

        let mut guard = self
            .inner
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let keep = guard.len().min(nbytes);
        fresh.as_mut_slice()[..keep].copy_from_slice(&guard.as_slice()[..keep]);
        let old = std::mem::replace(&mut *guard, fresh);
        tracing::debug!(
            dtype = %self.inner.dtype,
            from = old.len(),
            to = nbytes,
            "storage resized"
        );
        Ok(())
    }
}

fn byte_len(dtype: DType, numel: usize) -> Result<usize, TensorError> {
    let item_size = dtype.size_bytes();
    numel
        .checked_mul(item_size)
        .ok_or(TensorError::SizeOverflow { numel, item_size })
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("dtype", &self.dtype())
            .field("nbytes", &self.nbytes())
            .field("resizable", &self.is_resizable())
            .field("allocator", &self.allocator_name())
            .field("use_count", &self.use_count())
            .finish()
    }
}
