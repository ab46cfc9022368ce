// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocator selection loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! strategy = "pool"
//! memory_budget = "64M"
//! ```

use crate::{Allocator, HeapAllocator, MemoryBudget, MemoryError, MemoryPool};
use std::path::Path;
use std::sync::Arc;

/// Which allocation strategy new storages should use.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocatorConfig {
    /// `"heap"` or `"pool"`.
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Budget for the `"pool"` strategy, e.g. `"64M"`. Ignored by `"heap"`.
    #[serde(default = "default_budget")]
    pub memory_budget: String,
}

fn default_strategy() -> String {
    "heap".to_string()
}

fn default_budget() -> String {
    "64M".to_string()
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            memory_budget: default_budget(),
        }
    }
}

impl AllocatorConfig {
    pub fn from_file(path: &Path) -> Result<Self, MemoryError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MemoryError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, MemoryError> {
        toml::from_str(toml_str)
            .map_err(|e| MemoryError::Config(format!("TOML parse error: {e}")))
    }

    pub fn to_toml(&self) -> Result<String, MemoryError> {
        toml::to_string_pretty(self)
            .map_err(|e| MemoryError::Config(format!("TOML serialise error: {e}")))
    }

    pub fn parse_budget(&self) -> Result<MemoryBudget, MemoryError> {
        MemoryBudget::parse(&self.memory_budget)
    }

    /// Instantiates the configured strategy.
    pub fn build(&self) -> Result<Arc<dyn Allocator>, MemoryError> {
        let allocator: Arc<dyn Allocator> = match self.strategy.as_str() {
            "heap" => Arc::new(HeapAllocator),
            "pool" => Arc::new(MemoryPool::new(self.parse_budget()?)),
            other => {
                return Err(MemoryError::Config(format!(
                    "unknown allocator strategy '{other}' (expected 'heap' or 'pool')"
                )))
            }
        };
        tracing::info!("allocator strategy: {}", allocator.name());
        Ok(allocator)
    }
}
