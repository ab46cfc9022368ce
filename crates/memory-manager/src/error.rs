// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for allocation strategies.

/// Errors raised by an [`Allocator`](crate::Allocator) or its configuration.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The requested allocation would exceed the pool's budget.
    #[error("out of memory: requested {requested_bytes} bytes, but only {available_bytes} available (budget: {budget_bytes})")]
    OutOfMemory {
        requested_bytes: usize,
        available_bytes: usize,
        budget_bytes: usize,
    },

    /// A budget string could not be parsed.
    #[error("invalid memory budget '{0}': expected a positive number with an optional K/M/G suffix")]
    InvalidBudget(String),

    /// The allocator configuration is malformed or names an unknown strategy.
    #[error("allocator configuration error: {0}")]
    Config(String),
}
