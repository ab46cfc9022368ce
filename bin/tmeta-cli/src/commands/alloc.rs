// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tmeta alloc`: exercise the configured allocator through real storage.
//!
//! Without `--config` the heap allocator is used.

use memory_manager::{Allocator, AllocatorConfig};
use std::path::Path;
use std::sync::Arc;
use tensor_meta::{Storage, TensorImpl, TensorTypeId};

pub fn execute(
    config: Option<&Path>,
    elements: usize,
    dtype: &str,
    resize: Option<usize>,
) -> anyhow::Result<()> {
    let dtype = super::parse_dtype(dtype)?;
    let cfg = match config {
        Some(path) => AllocatorConfig::from_file(path)?,
        None => AllocatorConfig::default(),
    };
    let allocator = cfg.build()?;
    tracing::info!(strategy = %cfg.strategy, budget = %cfg.memory_budget, "allocator configured");

    super::banner("tmeta · Storage Allocation");
    println!("  Strategy:   {}", allocator.name());
    if cfg.strategy == "pool" {
        println!("  Budget:     {}", cfg.parse_budget()?);
    }

    let storage = Storage::new(dtype, elements, Arc::clone(&allocator), true)?;
    let mut record = TensorImpl::with_storage(storage, TensorTypeId::Cpu, false);
    record.set_sizes_contiguous(&[elements]);

    let storage = record.try_storage()?;
    println!("  Record:     {record}");
    println!("  Storage:    {} x {} = {} bytes", storage.numel(), dtype, storage.nbytes());
    print_stats("allocate", allocator.as_ref());

    if let Some(target) = resize {
        storage.resize(target)?;
        println!("  Resized:    {} elements ({} bytes)", storage.numel(), storage.nbytes());
        print_stats("resize", allocator.as_ref());
    }

    record.release_resources();
    println!("  Released:   storage dropped");
    print_stats("release", allocator.as_ref());
    Ok(())
}

fn print_stats(stage: &str, allocator: &dyn Allocator) {
    if let Some(stats) = allocator.stats() {
        println!("  Stats ({stage}): {}", stats.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_alloc_with_heap_defaults() {
        execute(None, 16, "f32", Some(32)).unwrap();
    }

    #[test]
    fn test_alloc_through_pool_config() {
        let path = std::env::temp_dir().join(format!("tmeta-alloc-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "strategy = \"pool\"\nmemory_budget = \"1M\"").unwrap();
        drop(file);

        let ok = execute(Some(&path), 256, "f64", Some(512));
        let too_big = execute(Some(&path), 1 << 20, "f64", None);
        std::fs::remove_file(&path).unwrap();

        ok.unwrap();
        assert!(too_big.is_err());
    }
}
