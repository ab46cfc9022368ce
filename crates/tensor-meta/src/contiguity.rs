// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Row-major layout detection.
//!
//! Kernels use the cached contiguity flag to choose a flat loop over a
//! strided one, so the rule here must match what a flat loop assumes:
//! walking the buffer from `storage_offset` visits elements in row-major
//! order with no gaps. Size-1 dimensions never move the cursor and are
//! ignored, whatever their stride.

/// How the strides of a record relate to its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Row-major with no gaps, or a strided view with no elements.
    Contiguous,
    /// Any other strided arrangement (transposed, sliced, broadcast...).
    Strided,
    /// The record carries no stride information at all, even if it is empty.
    ///
    /// Treated as contiguous by [`compute_contiguous`] for compatibility.
    Unstrided,
}

impl Layout {
    /// Whether the layout is reported as contiguous.
    pub fn is_contiguous(self) -> bool {
        self != Layout::Strided
    }
}

/// Returns `true` when `sizes`/`strides` describe a gap-free row-major view.
///
/// * Empty views (rank 0, or any size 0) are contiguous.
/// * Empty `strides` mean "no stride information" and are reported as
///   contiguous.
/// * Otherwise each non-unit dimension, innermost first, must have a stride
///   equal to the product of the sizes inside it.
///
/// The caller guarantees that non-empty `strides` have one entry per size.
pub fn compute_contiguous(sizes: &[usize], strides: &[isize]) -> bool {
    if sizes.is_empty() || sizes.contains(&0) {
        return true;
    }
    if strides.is_empty() {
        return true;
    }
    debug_assert_eq!(sizes.len(), strides.len());

    // `None` once the running product overflows; only a later non-unit
    // dimension compares against it.
    let mut expected: Option<isize> = Some(1);
    for (&size, &stride) in sizes.iter().zip(strides).rev() {
        if size == 1 {
            continue;
        }
        if expected != Some(stride) {
            return false;
        }
        expected = isize::try_from(size)
            .ok()
            .and_then(|size| stride.checked_mul(size));
    }
    true
}

/// Classifies a layout, keeping the stride-less state distinct.
pub fn classify_layout(sizes: &[usize], strides: &[isize]) -> Layout {
    if strides.is_empty() && !sizes.is_empty() {
        Layout::Unstrided
    } else if compute_contiguous(sizes, strides) {
        Layout::Contiguous
    } else {
        Layout::Strided
    }
}

/// Row-major strides for `sizes`. The innermost stride is 1.
///
/// Sizes of 0 are treated as 1 so every stride stays positive.
pub fn contiguous_strides(sizes: &[usize]) -> Vec<isize> {
    let mut strides = vec![1isize; sizes.len()];
    let mut running: isize = 1;
    for (stride, &size) in strides.iter_mut().zip(sizes).rev() {
        *stride = running;
        let size = isize::try_from(size.max(1)).unwrap_or(isize::MAX);
        running = running.saturating_mul(size);
    }
    strides
}
