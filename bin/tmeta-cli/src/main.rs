// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tmeta
//!
//! Command-line front end for the `tensor-meta` record.
//!
//! ## Usage
//! ```bash
//! # Describe a transposed 2x3 view
//! tmeta inspect --sizes 2,3 --strides 1,2
//!
//! # Resolve a negative dimension index
//! tmeta wrap --dim -1 --rank 2
//!
//! # Allocate storage through a pooled allocator
//! tmeta --config alloc.toml alloc --elements 1024 --dtype f32
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tmeta",
    about = "Inspect strided tensor metadata and storage allocation",
    version
)]
struct Cli {
    /// Path to an allocator TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print rank, element count and layout of a view.
    Inspect {
        /// Comma-separated sizes, e.g. "2,3". Omit for a scalar.
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        sizes: Vec<usize>,

        /// Comma-separated strides. Row-major strides are derived when omitted.
        #[arg(short = 't', long, value_delimiter = ',', allow_hyphen_values = true)]
        strides: Option<Vec<isize>>,

        /// Drop stride information entirely.
        #[arg(long, conflicts_with = "strides")]
        unstrided: bool,

        /// Element offset into the storage.
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Element type (f32, f64, i64, ...).
        #[arg(short, long, default_value = "f32")]
        dtype: String,
    },

    /// Resolve a possibly negative dimension index against a rank.
    Wrap {
        #[arg(short, long, allow_hyphen_values = true)]
        dim: i64,

        #[arg(short, long)]
        rank: usize,

        /// Let a rank-0 tensor accept dimension 0 / -1.
        #[arg(long)]
        scalar: bool,
    },

    /// Allocate storage through the configured allocator and report usage.
    Alloc {
        /// Number of elements to allocate.
        #[arg(short, long)]
        elements: usize,

        #[arg(short, long, default_value = "f32")]
        dtype: String,

        /// Also resize the storage to this many elements afterwards.
        #[arg(long)]
        resize: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    if let Some(path) = &cli.config {
        tracing::info!(config = %path.display(), "using allocator configuration");
    }

    match cli.command {
        Commands::Inspect {
            sizes,
            strides,
            unstrided,
            offset,
            dtype,
        } => commands::inspect::execute(sizes, strides, unstrided, offset, &dtype),
        Commands::Wrap { dim, rank, scalar } => commands::wrap::execute(dim, rank, scalar),
        Commands::Alloc {
            elements,
            dtype,
            resize,
        } => commands::alloc::execute(cli.config.as_deref(), elements, &dtype, resize),
    }
}
