// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Counters kept by the pooled allocator.

/// Cumulative counters for a [`MemoryPool`](crate::MemoryPool).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AllocationStats {
    /// Requests served from the free list.
    pub reused: u64,
    /// Requests that needed a fresh heap allocation.
    pub fresh: u64,
    /// Zero-byte requests, served without touching the pool.
    pub zero_sized: u64,
    /// Requests refused because the budget was exhausted.
    pub rejected: u64,
    /// Buffers handed back to the pool.
    pub returned: u64,
    /// High-water mark of live bytes.
    pub peak_bytes: usize,
}

impl AllocationStats {
    /// Requests that produced a buffer, excluding zero-byte ones.
    pub fn served(&self) -> u64 {
        self.reused + self.fresh
    }

    /// Fraction of served requests satisfied from the free list.
    pub fn reuse_ratio(&self) -> f64 {
        match self.served() {
            0 => 0.0,
            n => self.reused as f64 / n as f64,
        }
    }

    pub(crate) fn observe_live(&mut self, live_bytes: usize) {
        self.peak_bytes = self.peak_bytes.max(live_bytes);
    }

    pub fn summary(&self) -> String {
        format!(
            "{} served ({} reused, {} fresh, {:.0}% reuse), {} zero-sized, {} rejected, {} returned, peak {} bytes",
            self.served(),
            self.reused,
            self.fresh,
            self.reuse_ratio() * 100.0,
            self.zero_sized,
            self.rejected,
            self.returned,
            self.peak_bytes,
        )
    }
}
