//! Views - Borrowed Tensors
//!
//! `TensorView` describes externally owned bytes with a shape and dtype. It
//! borrows its data for `'a` and has no teardown of its own, so a view can
//! never free memory it does not own. Both `Tensor` and `TensorView`
//! implement `TensorData`, the read-only interface shared by owned and
//! borrowed tensors.
//!
//! # Example
//! ```rust
//! use tessera_tensor::{DType, TensorData, TensorView};
//!
//! let raw = [1_u8, 2, 3, 4, 5, 6];
//! let view = TensorView::new(&raw, &[2, 3], DType::U8).unwrap();
//! assert_eq!(view.as_slice::<u8>().unwrap(), &raw);
//! ```
//!
//! @version 0.1.0
//! @author Tessera Development Team

use tessera_core::dtype::{DType, Scalar};
use tessera_core::error::{Error, Result};

use crate::shape::Shape;

// =============================================================================
// TensorData Trait
// =============================================================================

/// Read-only access shared by owned and borrowed tensors.
pub trait TensorData {
    /// Returns the shape.
    fn shape(&self) -> &Shape;

    /// Returns the element dtype.
    fn dtype(&self) -> DType;

    /// Returns exactly `byte_size()` bytes of element data.
    fn as_bytes(&self) -> &[u8];

    /// Returns whether a gradient buffer is attached.
    fn requires_grad(&self) -> bool {
        false
    }

    /// Returns the number of owning handles, if the data is reference counted.
    fn ref_count(&self) -> Option<usize> {
        None
    }

    /// Returns the total number of elements.
    fn numel(&self) -> usize {
        self.shape().size()
    }

    /// Returns the size of the element data in bytes.
    fn byte_size(&self) -> usize {
        self.numel() * self.dtype().size_of()
    }

    /// Returns the elements as a typed slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if `T` is not the tensor dtype, or a layout
    /// error if the bytes are not suitably aligned for `T`.
    fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                expected: self.dtype(),
                actual: T::DTYPE,
            });
        }
        bytemuck::try_cast_slice(self.as_bytes())
            .map_err(|e| Error::layout(format!("cannot view tensor as {}: {e:?}", T::DTYPE)))
    }
}

// =============================================================================
// TensorView Struct
// =============================================================================

/// A tensor over borrowed bytes.
#[derive(Debug, Clone)]
pub struct TensorView<'a> {
    bytes: &'a [u8],
    shape: Shape,
    dtype: DType,
}

impl<'a> TensorView<'a> {
    /// Describes the leading bytes of `bytes` as a tensor.
    ///
    /// # Errors
    /// Returns `InvalidShape` for invalid dims and `InsufficientData` if
    /// `bytes` is shorter than `size * dtype.size_of()`.
    pub fn new(bytes: &'a [u8], dims: &[usize], dtype: DType) -> Result<Self> {
        let shape = Shape::new(dims)?;
        let required = shape
            .size()
            .checked_mul(dtype.size_of())
            .ok_or_else(|| Error::invalid_shape(dims, "byte size overflows usize"))?;

        if bytes.len() < required {
            return Err(Error::InsufficientData {
                expected: required,
                actual: bytes.len(),
            });
        }

        Ok(Self::from_parts(&bytes[..required], shape, dtype))
    }

    pub(crate) fn from_parts(bytes: &'a [u8], shape: Shape, dtype: DType) -> Self {
        Self {
            bytes,
            shape,
            dtype,
        }
    }
}

impl TensorData for TensorView<'_> {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn dtype(&self) -> DType {
        self.dtype
    }

    fn as_bytes(&self) -> &[u8] {
        self.bytes
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tensor;

    #[test]
    fn test_view_over_external_bytes() {
        let raw: Vec<u8> = (0..10).collect();
        let view = TensorView::new(&raw, &[2, 4], DType::U8).unwrap();
        assert_eq!(view.numel(), 8);
        assert_eq!(view.byte_size(), 8);
        assert_eq!(view.as_bytes(), &raw[..8]);
        assert!(view.ref_count().is_none());
        assert!(!view.requires_grad());
    }

    #[test]
    fn test_view_rejects_short_source() {
        let raw = [0_u8; 7];
        let err = TensorView::new(&raw, &[2], DType::F32).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientData {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_view_of_owned_tensor() {
        let t = Tensor::from_slice(&[1_i64, 2, 3], &[3], false).unwrap();
        let view = t.view();
        assert_eq!(view.shape(), t.shape());
        assert_eq!(view.as_slice::<i64>().unwrap(), &[1, 2, 3]);
        assert_eq!(t.ref_count(), 1);
    }

    #[test]
    fn test_view_dtype_mismatch() {
        let raw = [0_u8; 8];
        let view = TensorView::new(&raw, &[8], DType::U8).unwrap();
        assert!(matches!(
            view.as_slice::<f32>(),
            Err(Error::DTypeMismatch { .. })
        ));
    }
}
