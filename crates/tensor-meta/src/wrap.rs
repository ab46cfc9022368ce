// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Negative dimension index resolution.
//!
//! Every dimension argument in the crate goes through [`maybe_wrap_dim`]:
//! `-1` is the innermost dimension, `-rank` the outermost.

use crate::TensorError;

/// How a rank-0 record treats dimension indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// A rank-0 record has no valid dimension index.
    #[default]
    Strict,
    /// A rank-0 record accepts `0` and `-1`, as if it had one dimension.
    Scalar,
}

impl WrapMode {
    fn wraps_scalar(self) -> bool {
        self == WrapMode::Scalar
    }
}

impl From<bool> for WrapMode {
    fn from(wrap_scalar: bool) -> Self {
        if wrap_scalar {
            WrapMode::Scalar
        } else {
            WrapMode::Strict
        }
    }
}

/// Resolves a possibly negative `dim` against `rank`.
///
/// # Examples
/// ```
/// use tensor_meta::maybe_wrap_dim;
///
/// assert_eq!(maybe_wrap_dim(-1, 3, false).unwrap(), 2);
/// assert_eq!(maybe_wrap_dim(0, 0, true).unwrap(), 0);
/// assert!(maybe_wrap_dim(3, 3, false).is_err());
/// ```
pub fn maybe_wrap_dim(
    dim: i64,
    rank: usize,
    wrap_scalar: impl Into<WrapMode>,
) -> Result<usize, TensorError> {
    let mode = wrap_scalar.into();
    let rank = if rank == 0 {
        if !mode.wraps_scalar() {
            return Err(TensorError::ZeroDimIndex { dim });
        }
        1
    } else {
        rank
    };

    let rank = i64::try_from(rank).unwrap_or(i64::MAX);
    let (min, max) = (-rank, rank - 1);
    if dim < min || dim > max {
        return Err(TensorError::DimOutOfRange { dim, min, max });
    }
    let wrapped = if dim < 0 { dim + rank } else { dim };
    // 0 <= wrapped < rank, so the cast is lossless.
    Ok(wrapped as usize)
}

/// Resolves every entry of `dims`, failing on the first bad one.
pub fn maybe_wrap_dims(
    dims: &[i64],
    rank: usize,
    wrap_scalar: impl Into<WrapMode>,
) -> Result<Vec<usize>, TensorError> {
    let mode = wrap_scalar.into();
    dims.iter()
        .map(|&dim| maybe_wrap_dim(dim, rank, mode))
        .collect()
}
