// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Gradient access hook.
//!
//! The plain record does not track gradients. Types that do compose a
//! [`TensorImpl`] and implement [`Differentiable`] themselves; the record's
//! own implementation always refuses.

use crate::{TensorError, TensorImpl};

/// Access to the gradient accumulated for a tensor.
pub trait Differentiable {
    fn grad(&self) -> Result<&TensorImpl, TensorError>;

    fn grad_mut(&mut self) -> Result<&mut TensorImpl, TensorError>;
}

impl Differentiable for TensorImpl {
    fn grad(&self) -> Result<&TensorImpl, TensorError> {
        Err(not_supported())
    }

    fn grad_mut(&mut self) -> Result<&mut TensorImpl, TensorError> {
        Err(not_supported())
    }
}

fn not_supported() -> TensorError {
    TensorError::NotSupported {
        op: "grad",
        record: "TensorImpl",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DType, TensorTypeId};
    use memory_manager::HeapAllocator;
    use std::sync::Arc;

    #[test]
    fn test_base_record_refuses() {
        let mut t =
            TensorImpl::new(TensorTypeId::Cpu, DType::F32, Arc::new(HeapAllocator), true).unwrap();
        let err = t.grad().unwrap_err();
        assert_eq!(err.to_string(), "grad is not implemented for TensorImpl");
        assert!(matches!(
            t.grad_mut(),
            Err(TensorError::NotSupported { op: "grad", .. })
        ));
    }
}
