// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element data types.

use std::fmt;

/// The element type of a tensor.
///
/// Storage sizes its allocations with [`DType::size_bytes`]. The
/// [`DType::Uninitialized`] sentinel marks a record whose element type has
/// not been chosen yet; such records are built without a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// No element type yet. Has size 0.
    Uninitialized,
    Bool,
    U8,
    I8,
    I16,
    I32,
    I64,
    /// 16-bit IEEE 754 floating point.
    F16,
    /// 16-bit brain floating point.
    BF16,
    F32,
    F64,
}

impl DType {
    /// Size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::Uninitialized => 0,
            DType::Bool | DType::U8 | DType::I8 => 1,
            DType::I16 | DType::F16 | DType::BF16 => 2,
            DType::I32 | DType::F32 => 4,
            DType::I64 | DType::F64 => 8,
        }
    }

    pub fn is_uninitialized(self) -> bool {
        self == DType::Uninitialized
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DType::Uninitialized => "uninitialized",
            DType::Bool => "bool",
            DType::U8 => "u8",
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::F32 => "f32",
            DType::F64 => "f64",
        }
    }

    /// Inverse of [`DType::as_str`]. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [DType; 11] = [
            DType::Uninitialized,
            DType::Bool,
            DType::U8,
            DType::I8,
            DType::I16,
            DType::I32,
            DType::I64,
            DType::F16,
            DType::BF16,
            DType::F32,
            DType::F64,
        ];
        let name = name.trim();
        ALL.into_iter().find(|d| d.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
