// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor metadata and storage.

use crate::DType;

/// Recoverable errors raised by records and storages.
///
/// Misuse of the stride accessors on a stride-less record is not represented
/// here: it is a caller bug and panics.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// A dimension index fell outside `[min, max]`.
    #[error("dimension out of range (expected to be in range of [{min}, {max}], but got {dim})")]
    DimOutOfRange { dim: i64, min: i64, max: i64 },

    /// A dimension was requested from a rank-0 record without scalar wrapping.
    #[error("dimension specified as {dim} but tensor has no dimensions")]
    ZeroDimIndex { dim: i64 },

    /// The operation is not available on this kind of record.
    #[error("{op} is not implemented for {record}")]
    NotSupported {
        op: &'static str,
        record: &'static str,
    },

    /// The record was built without a buffer (undefined/sparse tag or
    /// uninitialised dtype) or its buffer has been released.
    #[error("tensor has no storage")]
    NoStorage,

    /// Sizes and strides passed together had different lengths.
    #[error("sizes has rank {sizes} but strides has rank {strides}")]
    StrideRankMismatch { sizes: usize, strides: usize },

    /// An element index was past the end of the storage.
    #[error("element index {index} out of bounds for storage of {numel} elements")]
    IndexOutOfBounds { index: usize, numel: usize },

    /// Typed access did not match the storage's element type.
    #[error("dtype mismatch: expected {expected}, storage holds {actual}")]
    DTypeMismatch { expected: DType, actual: DType },

    /// A resize was requested on storage that was created non-resizable.
    #[error("storage is not resizable")]
    NotResizable,

    /// `numel * itemsize` does not fit in `usize`.
    #[error("allocation size overflow: {numel} elements of {item_size} bytes")]
    SizeOverflow { numel: usize, item_size: usize },

    /// The allocation strategy failed.
    #[error("memory error: {0}")]
    Memory(#[from] memory_manager::MemoryError),
}
