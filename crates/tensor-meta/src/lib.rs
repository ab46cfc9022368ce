// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-meta
//!
//! Shape, stride and storage metadata for strided N-dimensional tensors.
//!
//! This crate provides:
//! - [`TensorImpl`]: the metadata record of one view: sizes, strides,
//!   storage offset, cached element count and cached contiguity flag.
//! - [`Storage`]: a shared, reference-counted buffer that any number of
//!   records may alias.
//! - [`maybe_wrap_dim`]: resolution of negative dimension indices.
//! - [`compute_contiguous`]: the row-major layout check kernels use to pick
//!   a flat loop over a strided one.
//! - [`DType`] / [`TensorTypeId`]: element type and backend tag.
//! - [`Differentiable`]: the gradient hook; the plain record refuses it.
//!
//! Buffers are obtained through the [`memory_manager::Allocator`] seam.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use memory_manager::HeapAllocator;
//! use tensor_meta::{DType, Storage, TensorImpl, TensorTypeId};
//!
//! let storage = Storage::new(DType::F32, 6, Arc::new(HeapAllocator), true).unwrap();
//! let mut t = TensorImpl::with_storage(storage, TensorTypeId::Cpu, false);
//! t.set_sizes_contiguous(&[2, 3]);
//! assert!(t.is_contiguous());
//!
//! // transpose
//! t.set_sizes_and_strides(&[3, 2], &[1, 3]).unwrap();
//! assert!(!t.is_contiguous());
//! assert_eq!(t.size(-1).unwrap(), 2);
//! ```

pub mod contiguity;
mod dtype;
mod error;
mod grad;
mod storage;
mod tensor_impl;
mod type_id;
pub mod wrap;

pub use contiguity::{compute_contiguous, contiguous_strides, Layout};
pub use dtype::DType;
pub use error::TensorError;
pub use grad::Differentiable;
pub use storage::Storage;
pub use tensor_impl::TensorImpl;
pub use type_id::TensorTypeId;
pub use wrap::{maybe_wrap_dim, maybe_wrap_dims, WrapMode};
