// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod alloc;
pub mod inspect;
pub mod wrap;

use tensor_meta::DType;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `-v` when set.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub(crate) fn parse_dtype(name: &str) -> anyhow::Result<DType> {
    DType::from_name(name).ok_or_else(|| anyhow::anyhow!("unknown dtype '{name}'"))
}

pub(crate) fn banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║{title:^54}║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
}
