// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tmeta inspect`: build a record for a shape and report its layout.

use memory_manager::HeapAllocator;
use std::sync::Arc;
use tensor_meta::{Layout, TensorImpl, TensorTypeId};

pub fn execute(
    sizes: Vec<usize>,
    strides: Option<Vec<isize>>,
    unstrided: bool,
    offset: usize,
    dtype: &str,
) -> anyhow::Result<()> {
    let dtype = super::parse_dtype(dtype)?;
    let mut record = TensorImpl::new(TensorTypeId::Cpu, dtype, Arc::new(HeapAllocator), false)?;

    match strides {
        _ if unstrided => record.set_sizes_unstrided(&sizes),
        Some(strides) => record.set_sizes_and_strides(&sizes, &strides)?,
        None => record.set_sizes_contiguous(&sizes),
    }
    record.set_storage_offset(offset);

    super::banner("tmeta · Layout Inspector");

    println!("  Record:     {record}");
    println!("  Rank:       {}", record.dim());
    println!("  Sizes:      {:?}", record.sizes());
    match record.layout() {
        Layout::Unstrided => println!("  Strides:    <none>"),
        _ => println!("  Strides:    {:?}", record.strides()),
    }
    println!("  Offset:     {}", record.storage_offset());
    println!("  Elements:   {}", record.numel());
    println!(
        "  Bytes:      {}",
        record.numel().saturating_mul(dtype.size_bytes())
    );
    println!();

    let verdict = match record.layout() {
        Layout::Contiguous => "contiguous (flat loop)",
        Layout::Strided => "strided (strided loop required)",
        Layout::Unstrided => "no stride information (reported as contiguous)",
    };
    println!("  Layout:     {verdict}");
    println!("  Contiguous: {}", record.is_contiguous());

    Ok(())
}
