// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tmeta wrap`: resolve a dimension index.

use tensor_meta::maybe_wrap_dim;

pub fn execute(dim: i64, rank: usize, scalar: bool) -> anyhow::Result<()> {
    let resolved = maybe_wrap_dim(dim, rank, scalar)?;
    println!("dim {dim} of rank {rank} -> {resolved}");
    Ok(())
}
