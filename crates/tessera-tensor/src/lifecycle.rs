//! Lifecycle - Handle Operations on Optional Tensors
//!
//! These mirror `Tensor::retain`, `Tensor::release` and `Tensor::destroy`
//! for call sites that may hold no tensor at all; an absent handle is a
//! no-op.
//!
//! @version 0.1.0
//! @author Tessera Development Team

use crate::tensor::Tensor;

// =============================================================================
// Handle Operations
// =============================================================================

/// Returns a new handle to `tensor`, or `None` if there is none.
#[must_use]
pub fn retain(tensor: Option<&Tensor>) -> Option<Tensor> {
    tensor.map(Tensor::retain)
}

/// Releases `tensor` if present.
pub fn release(tensor: Option<Tensor>) {
    if let Some(tensor) = tensor {
        tensor.release();
    }
}

/// Destroys `tensor` if present and uniquely owned.
///
/// # Errors
/// Hands a shared tensor back unchanged.
pub fn destroy(tensor: Option<Tensor>) -> Result<(), Tensor> {
    tensor.map_or(Ok(()), Tensor::destroy)
}

// =============================================================================
// Tests
// =============================================================================
