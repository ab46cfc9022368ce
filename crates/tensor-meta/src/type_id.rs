// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Backend/layout tags attached to every record.

use std::fmt;

/// Identifies the backend and storage kind of a [`TensorImpl`](crate::TensorImpl).
///
/// The record only compares tags; dispatch on them happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorTypeId {
    /// The tag of an undefined tensor. Never carries data.
    Undefined,
    Cpu,
    Cuda,
    SparseCpu,
    SparseCuda,
    /// A tag owned by an external registry.
    Opaque(u16),
}

impl TensorTypeId {
    pub fn is_sparse(self) -> bool {
        matches!(self, TensorTypeId::SparseCpu | TensorTypeId::SparseCuda)
    }

    /// Whether records with this tag are given a dense buffer on construction.
    pub fn carries_storage(self) -> bool {
        !(self == TensorTypeId::Undefined || self.is_sparse())
    }
}

impl fmt::Display for TensorTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorTypeId::Undefined => f.write_str("undefined"),
            TensorTypeId::Cpu => f.write_str("cpu"),
            TensorTypeId::Cuda => f.write_str("cuda"),
            TensorTypeId::SparseCpu => f.write_str("sparse-cpu"),
            TensorTypeId::SparseCuda => f.write_str("sparse-cuda"),
            TensorTypeId::Opaque(id) => write!(f, "opaque({id})"),
        }
    }
}
