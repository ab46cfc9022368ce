// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Byte ceilings for the pooled allocator.

use crate::MemoryError;
use std::fmt;
use std::str::FromStr;

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;
const GIB: usize = 1024 * MIB;

/// Longest suffixes first so `"MB"` is not mistaken for `"B"`.
const SUFFIXES: [(&str, usize); 7] = [
    ("GB", GIB),
    ("MB", MIB),
    ("KB", KIB),
    ("G", GIB),
    ("M", MIB),
    ("K", KIB),
    ("B", 1),
];

/// A hard ceiling on the bytes a [`MemoryPool`](crate::MemoryPool) may hand out.
///
/// Parses case-insensitive strings such as `"64M"`, `"1GB"`, `"512k"` or a
/// bare byte count.
///
/// ```
/// use memory_manager::MemoryBudget;
///
/// let b: MemoryBudget = "2M".parse().unwrap();
/// assert_eq!(b.as_bytes(), 2 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct MemoryBudget {
    bytes: usize,
}

impl MemoryBudget {
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    pub fn from_mb(mb: usize) -> Self {
        Self::from_bytes(mb.saturating_mul(MIB))
    }

    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Parses a human-readable budget. Zero budgets are rejected.
    pub fn parse(s: &str) -> Result<Self, MemoryError> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let (digits, scale) = SUFFIXES
            .iter()
            .find_map(|(suffix, scale)| {
                upper
                    .strip_suffix(*suffix)
                    .map(|rest| (rest.trim_end(), *scale))
            })
            .unwrap_or((upper.as_str(), 1));

        let invalid = || MemoryError::InvalidBudget(trimmed.to_string());
        let value: usize = digits.parse().map_err(|_| invalid())?;
        match value.checked_mul(scale) {
            Some(0) | None => Err(invalid()),
            Some(bytes) => Ok(Self { bytes }),
        }
    }
}

impl FromStr for MemoryBudget {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MemoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, scale) = [("GB", GIB), ("MB", MIB), ("KB", KIB)]
            .into_iter()
            .find(|(_, scale)| self.bytes >= *scale && self.bytes % scale == 0)
            .unwrap_or(("B", 1));
        write!(f, "{} {unit}", self.bytes / scale)
    }
}
