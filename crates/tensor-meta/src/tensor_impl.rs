// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The array metadata record.
//!
//! A [`TensorImpl`] describes one view over a [`Storage`]: its shape, the
//! per-dimension strides (in elements), the element offset of the first
//! element, and two cached values derived from the shape: the element count
//! and the contiguity flag. Both caches are refreshed by every shape or
//! stride mutation, so readers never observe stale values.
//!
//! Metadata is per record. Data is shared: several records may alias one
//! storage, and resizing or squeezing one of them leaves the others alone.
//!
//! # Stride-less records
//! A record whose `strides` are empty carries no stride information at all
//! (see [`TensorImpl::set_sizes_unstrided`]). It reports itself as
//! contiguous, and calling [`TensorImpl::strides`] or
//! [`TensorImpl::stride`] on it is a bug that panics.

use crate::contiguity::{classify_layout, compute_contiguous, contiguous_strides, Layout};
use crate::{maybe_wrap_dim, DType, Storage, TensorError, TensorTypeId};
use memory_manager::Allocator;
use std::fmt;
use std::sync::Arc;

const STRIDELESS_MSG: &str = "tensor strides are not meaningful for this record";

/// Shape, strides and storage reference of an N-dimensional view.
///
/// `Clone` yields a second record aliasing the same storage with its own
/// copy of the metadata.
#[derive(Debug, Clone)]
pub struct TensorImpl {
    storage: Option<Storage>,
    storage_offset: usize,
    sizes: Vec<usize>,
    strides: Vec<isize>,
    numel: usize,
    is_contiguous: bool,
    type_id: TensorTypeId,
    dtype: DType,
    is_variable: bool,
}

impl TensorImpl {
    /// Creates an empty rank-1 record (`sizes == [0]`, `strides == [1]`).
    ///
    /// A zero-length, resizable storage is allocated through `allocator`
    /// unless `type_id` is undefined or sparse, or `dtype` is
    /// [`DType::Uninitialized`]; those records have no storage.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use memory_manager::HeapAllocator;
    /// use tensor_meta::{DType, TensorImpl, TensorTypeId};
    ///
    /// let t = TensorImpl::new(TensorTypeId::Cpu, DType::F32, Arc::new(HeapAllocator), false).unwrap();
    /// assert_eq!(t.sizes(), &[0]);
    /// assert_eq!(t.numel(), 0);
    /// assert!(t.has_storage());
    /// ```
    pub fn new(
        type_id: TensorTypeId,
        dtype: DType,
        allocator: Arc<dyn Allocator>,
        is_variable: bool,
    ) -> Result<Self, TensorError> {
        let storage = if type_id.carries_storage() && !dtype.is_uninitialized() {
            Some(Storage::empty(dtype, allocator)?)
        } else {
            None
        };
        tracing::debug!(
            %type_id,
            %dtype,
            has_storage = storage.is_some(),
            "tensor record created"
        );
        Ok(Self::from_parts(storage, type_id, dtype, is_variable))
    }

    /// Takes ownership of `storage`; the element type is the storage's.
    pub fn with_storage(storage: Storage, type_id: TensorTypeId, is_variable: bool) -> Self {
        let dtype = storage.dtype();
        Self::with_storage_and_dtype(storage, type_id, dtype, is_variable)
    }

    /// Takes ownership of `storage` with an explicit element type.
    pub fn with_storage_and_dtype(
        storage: Storage,
        type_id: TensorTypeId,
        dtype: DType,
        is_variable: bool,
    ) -> Self {
        Self::from_parts(Some(storage), type_id, dtype, is_variable)
    }

    fn from_parts(
        storage: Option<Storage>,
        type_id: TensorTypeId,
        dtype: DType,
        is_variable: bool,
    ) -> Self {
        Self {
            storage,
            storage_offset: 0,
            sizes: vec![0],
            strides: vec![1],
            numel: 0,
            is_contiguous: true,
            type_id,
            dtype,
            is_variable,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Per-dimension strides, in elements.
    ///
    /// # Panics
    /// Panics if the record carries no stride information.
    pub fn strides(&self) -> &[isize] {
        self.assert_strided();
        &self.strides
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.sizes.len()
    }

    /// Size of dimension `d`; negative `d` counts from the end.
    pub fn size(&self, d: i64) -> Result<usize, TensorError> {
        let d = maybe_wrap_dim(d, self.dim(), false)?;
        Ok(self.sizes[d])
    }

    /// Stride of dimension `d`; negative `d` counts from the end.
    ///
    /// # Panics
    /// Panics if the record carries no stride information.
    pub fn stride(&self, d: i64) -> Result<isize, TensorError> {
        self.assert_strided();
        let d = maybe_wrap_dim(d, self.dim(), false)?;
        Ok(self.strides[d])
    }

    /// Product of the sizes; `1` for a rank-0 record.
    pub fn numel(&self) -> usize {
        self.numel
    }

    /// Cached result of the contiguity check for the current shape.
    pub fn is_contiguous(&self) -> bool {
        self.is_contiguous
    }

    /// Like [`TensorImpl::is_contiguous`], but tells stride-less records apart.
    pub fn layout(&self) -> Layout {
        classify_layout(&self.sizes, &self.strides)
    }

    /// `true` for rank 0 or when any dimension has size 0.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty() || self.sizes.contains(&0)
    }

    pub fn storage_offset(&self) -> usize {
        self.storage_offset
    }

    pub fn type_id(&self) -> TensorTypeId {
        self.type_id
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn is_variable(&self) -> bool {
        self.is_variable
    }

    /// The aliased storage, if the record holds one.
    pub fn storage(&self) -> Option<&Storage> {
        self.storage.as_ref()
    }

    /// The aliased storage, or [`TensorError::NoStorage`].
    pub fn try_storage(&self) -> Result<&Storage, TensorError> {
        self.storage.as_ref().ok_or(TensorError::NoStorage)
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    // ── Shape mutation ────────────────────────────────────────

    /// Truncates or zero-pads both sizes and strides to `ndim` entries.
    pub fn resize_dim(&mut self, ndim: usize) {
        self.sizes.resize(ndim, 0);
        self.strides.resize(ndim, 0);
        self.refresh();
    }

    pub fn set_size(&mut self, d: i64, value: usize) -> Result<(), TensorError> {
        let d = maybe_wrap_dim(d, self.dim(), false)?;
        self.sizes[d] = value;
        self.refresh();
        Ok(())
    }

    /// # Panics
    /// Panics if the record carries no stride information.
    pub fn set_stride(&mut self, d: i64, value: isize) -> Result<(), TensorError> {
        self.assert_strided();
        let d = maybe_wrap_dim(d, self.dim(), false)?;
        self.strides[d] = value;
        self.refresh();
        Ok(())
    }

    /// Sets the shape and derives row-major strides for it.
    pub fn set_sizes_contiguous(&mut self, sizes: &[usize]) {
        self.sizes = sizes.to_vec();
        self.strides = contiguous_strides(sizes);
        self.refresh();
    }

    /// Sets shape and strides together.
    pub fn set_sizes_and_strides(
        &mut self,
        sizes: &[usize],
        strides: &[isize],
    ) -> Result<(), TensorError> {
        if sizes.len() != strides.len() {
            return Err(TensorError::StrideRankMismatch {
                sizes: sizes.len(),
                strides: strides.len(),
            });
        }
        self.sizes = sizes.to_vec();
        self.strides = strides.to_vec();
        self.refresh();
        Ok(())
    }

    /// Sets the shape and drops all stride information.
    pub fn set_sizes_unstrided(&mut self, sizes: &[usize]) {
        self.sizes = sizes.to_vec();
        self.strides.clear();
        self.refresh();
    }

    pub fn set_storage_offset(&mut self, storage_offset: usize) {
        self.storage_offset = storage_offset;
    }

    /// Squeezes a `[1]`-shaped record to rank 0 when `condition` holds.
    ///
    /// Reductions use this to produce a scalar only when the caller did not
    /// ask to keep the reduced dimension. Any other shape is left alone.
    pub fn maybe_zero_dim(&mut self, condition: bool) -> &mut Self {
        if condition && self.sizes == [1] {
            self.resize_dim(0);
        }
        self
    }

    /// Drops this record's storage handle. Safe to call repeatedly.
    pub fn release_resources(&mut self) {
        if let Some(storage) = self.storage.take() {
            tracing::debug!(
                remaining_aliases = storage.use_count() - 1,
                "tensor record released its storage"
            );
        }
    }

    fn refresh(&mut self) {
        self.numel = self
            .sizes
            .iter()
            .fold(1usize, |acc, &size| acc.saturating_mul(size));
        self.is_contiguous = compute_contiguous(&self.sizes, &self.strides);
        tracing::trace!(
            sizes = ?self.sizes,
            strides = ?self.strides,
            numel = self.numel,
            contiguous = self.is_contiguous,
            "tensor shape updated"
        );
    }

    fn assert_strided(&self) {
        assert!(
            self.strides.len() == self.sizes.len(),
            "{STRIDELESS_MSG} ({} strides for {} dimensions)",
            self.strides.len(),
            self.sizes.len(),
        );
    }
}

impl fmt::Display for TensorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TensorImpl(sizes={:?}, ", self.sizes)?;
        if self.strides.len() == self.sizes.len() {
            write!(f, "strides={:?}, ", self.strides)?;
        } else {
            write!(f, "strides=<none>, ")?;
        }
        write!(
            f,
            "offset={}, dtype={}, type={}, {})",
            self.storage_offset,
            self.dtype,
            self.type_id,
            if self.is_contiguous { "contiguous" } else { "strided" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_manager::HeapAllocator;

    fn cpu_f32() -> TensorImpl {
        TensorImpl::new(TensorTypeId::Cpu, DType::F32, Arc::new(HeapAllocator), false).unwrap()
    }

    #[test]
    fn test_fresh_record() {
        let t = cpu_f32();
        assert_eq!(t.sizes(), &[0]);
        assert_eq!(t.strides(), &[1]);
        assert_eq!(t.dim(), 1);
        assert_eq!(t.numel(), 0);
        assert!(t.is_contiguous());
        assert_eq!(t.storage_offset(), 0);
        let storage = t.storage().unwrap();
        assert_eq!(storage.numel(), 0);
        assert_eq!(storage.dtype(), DType::F32);
        assert!(storage.is_resizable());
    }

    #[test]
    fn test_storage_less_variants() {
        for type_id in [
            TensorTypeId::Undefined,
            TensorTypeId::SparseCpu,
            TensorTypeId::SparseCuda,
        ] {
            let t = TensorImpl::new(type_id, DType::F32, Arc::new(HeapAllocator), false).unwrap();
            assert!(!t.has_storage(), "{type_id} must not allocate");
            assert_eq!(t.sizes(), &[0]);
        }

        let t = TensorImpl::new(
            TensorTypeId::Cpu,
            DType::Uninitialized,
            Arc::new(HeapAllocator),
            false,
        )
        .unwrap();
        assert!(matches!(t.try_storage(), Err(TensorError::NoStorage)));
    }

    #[test]
    fn test_size_and_stride_wrap() {
        let mut t = cpu_f32();
        t.set_sizes_contiguous(&[4, 5]);
        assert_eq!(t.size(-1).unwrap(), 5);
        assert_eq!(t.size(0).unwrap(), 4);
        assert_eq!(t.stride(-2).unwrap(), 5);
        assert!(matches!(t.size(2), Err(TensorError::DimOutOfRange { .. })));
        assert!(t.stride(-3).is_err());
    }

    #[test]
    fn test_rank_zero_size_is_error() {
        let mut t = cpu_f32();
        t.resize_dim(0);
        assert_eq!(t.numel(), 1);
        assert!(matches!(t.size(0), Err(TensorError::ZeroDimIndex { dim: 0 })));
    }

    #[test]
    fn test_mutations_refresh_caches() {
        let mut t = cpu_f32();
        t.set_sizes_and_strides(&[2, 3], &[3, 1]).unwrap();
        assert!(t.is_contiguous());
        assert_eq!(t.numel(), 6);

        t.set_stride(0, 1).unwrap();
        t.set_stride(1, 2).unwrap();
        assert!(!t.is_contiguous());
        assert_eq!(t.layout(), Layout::Strided);

        t.set_size(0, 0).unwrap();
        assert_eq!(t.numel(), 0);
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_set_sizes_and_strides_rank_mismatch() {
        let mut t = cpu_f32();
        let err = t.set_sizes_and_strides(&[2, 3], &[1]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::StrideRankMismatch { sizes: 2, strides: 1 }
        ));
        assert_eq!(t.sizes(), &[0]);
    }

    #[test]
    fn test_resize_dim_pads_with_zeros() {
        let mut t = cpu_f32();
        t.set_sizes_contiguous(&[3]);
        t.resize_dim(3);
        assert_eq!(t.sizes(), &[3, 0, 0]);
        assert_eq!(t.strides(), &[1, 0, 0]);
        assert_eq!(t.numel(), 0);
    }

    #[test]
    fn test_unstrided_record() {
        let mut t = cpu_f32();
        t.set_sizes_unstrided(&[3, 4]);
        assert!(t.is_contiguous());
        assert_eq!(t.layout(), Layout::Unstrided);
        assert_eq!(t.numel(), 12);
        assert_eq!(t.size(1).unwrap(), 4);
        assert!(t.to_string().contains("strides=<none>"));
    }

    #[test]
    fn test_empty_unstrided_record_keeps_its_layout() {
        let mut t = cpu_f32();
        t.set_sizes_unstrided(&[2, 0]);
        assert_eq!(t.numel(), 0);
        assert!(t.is_contiguous());
        assert_eq!(t.layout(), Layout::Unstrided);
    }

    #[test]
    #[should_panic(expected = "tensor strides are not meaningful")]
    fn test_unstrided_strides_panics() {
        let mut t = cpu_f32();
        t.set_sizes_unstrided(&[3, 4]);
        let _ = t.strides();
    }

    #[test]
    #[should_panic(expected = "tensor strides are not meaningful")]
    fn test_unstrided_stride_panics() {
        let mut t = cpu_f32();
        t.set_sizes_unstrided(&[3, 4]);
        let _ = t.stride(0);
    }

    #[test]
    fn test_maybe_zero_dim() {
        let mut t = cpu_f32();
        t.set_sizes_contiguous(&[1]);
        assert_eq!(t.maybe_zero_dim(false).dim(), 1);
        assert_eq!(t.maybe_zero_dim(true).dim(), 0);
        assert_eq!(t.numel(), 1);
        assert!(t.strides().is_empty());

        // already rank 0: nothing to squeeze
        assert_eq!(t.maybe_zero_dim(true).dim(), 0);

        let mut wide = cpu_f32();
        wide.set_sizes_contiguous(&[5]);
        assert_eq!(wide.maybe_zero_dim(true).sizes(), &[5]);

        let mut two_d = cpu_f32();
        two_d.set_sizes_contiguous(&[1, 1]);
        assert_eq!(two_d.maybe_zero_dim(true).sizes(), &[1, 1]);
    }

    #[test]
    fn test_release_resources_is_idempotent() {
        let mut t = cpu_f32();
        t.release_resources();
        assert!(!t.has_storage());
        t.release_resources();
        assert!(!t.has_storage());
        assert_eq!(t.sizes(), &[0]);
    }

    #[test]
    fn test_clone_aliases_storage_not_metadata() {
        let mut a = cpu_f32();
        a.set_sizes_contiguous(&[2, 2]);
        let mut b = a.clone();
        b.set_sizes_contiguous(&[4]);
        b.set_storage_offset(1);

        assert_eq!(a.sizes(), &[2, 2]);
        assert_eq!(a.storage_offset(), 0);
        assert!(a.storage().unwrap().is_alias_of(b.storage().unwrap()));
    }

    #[test]
    fn test_display() {
        let mut t = cpu_f32();
        t.set_sizes_and_strides(&[2, 3], &[1, 2]).unwrap();
        assert_eq!(
            t.to_string(),
            "TensorImpl(sizes=[2, 3], strides=[1, 2], offset=0, dtype=f32, type=cpu, strided)"
        );
    }
}
