//! Tensor - Reference-Counted N-Dimensional Array
//!
//! A `Tensor` is a cheap handle to a shared tensor record. The record owns
//! the data buffer, the optional gradient buffer and the shape; it is torn
//! down exactly once, when the last handle is released.
//!
//! # Key Features
//! - Shared ownership: `retain` clones a handle, `release` drops one
//! - Deterministic teardown order: data, gradient, dims, strides
//! - Gradient slot allocated and zeroed iff `requires_grad`
//! - Typed read access checked against the tensor dtype
//!
//! # Example
//! ```rust
//! use tessera_tensor::{DType, Tensor};
//!
//! let t = Tensor::zeros(&[2, 3], DType::F32, false).unwrap();
//! let shared = t.retain();
//! assert_eq!(t.ref_count(), 2);
//! shared.release();
//! assert_eq!(t.ref_count(), 1);
//! ```
//!
//! @version 0.1.0
//! @author Tessera Development Team

use std::sync::{Arc, Weak};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rand::Rng;
use tracing::{trace, warn};

use tessera_core::allocator::Allocator;
use tessera_core::buffer::Buffer;
use tessera_core::dtype::{DType, Scalar};
use tessera_core::error::{Error, Result};

use crate::node::NodeId;
use crate::shape::Shape;
use crate::view::{TensorData, TensorView};

// =============================================================================
// Tensor Record
// =============================================================================

/// The shared record behind every handle.
///
/// Fields drop in declaration order, which fixes the teardown sequence.
pub(crate) struct TensorInner {
    data: Buffer,
    grad: Option<RwLock<Buffer>>,
    shape: Shape,
    dtype: DType,
    requires_grad: bool,
    grad_fn: Option<NodeId>,
}

impl Drop for TensorInner {
    fn drop(&mut self) {
        trace!(
            dims = ?self.shape.dims(),
            dtype = %self.dtype,
            bytes = self.data.len(),
            has_grad = self.grad.is_some(),
            "releasing tensor"
        );
    }
}

/// Buffers and metadata of a tensor that has not been shared yet.
///
/// Constructors fill `data` through this type before it is frozen into a
/// `Tensor`; dropping it releases everything allocated so far.
#[derive(Debug)]
pub(crate) struct TensorParts {
    pub(crate) shape: Shape,
    pub(crate) dtype: DType,
    pub(crate) requires_grad: bool,
    pub(crate) data: Buffer,
    pub(crate) grad: Option<Buffer>,
}

impl TensorParts {
    /// Validates `dims` and allocates the data and, if requested, gradient
    /// buffers.
    pub(crate) fn allocate<A>(
        dims: &[usize],
        dtype: DType,
        requires_grad: bool,
        alloc: &A,
    ) -> Result<Self>
    where
        A: Allocator + ?Sized,
    {
        let shape = Shape::new(dims)?;
        let bytes = shape
            .size()
            .checked_mul(dtype.size_of())
            .ok_or(Error::AllocationFailed { bytes: usize::MAX })?;

        let data = alloc.allocate(bytes)?;
        let grad = if requires_grad {
            Some(alloc.allocate(bytes)?)
        } else {
            None
        };

        Ok(Self {
            shape,
            dtype,
            requires_grad,
            data,
            grad,
        })
    }
}

// =============================================================================
// Tensor Handle
// =============================================================================

/// Handle to a shared, immutable-shape tensor.
///
/// Cloning a handle is `retain`; dropping it is `release`.
#[derive(Clone)]
pub struct Tensor {
    inner: Arc<TensorInner>,
}

impl Tensor {
    pub(crate) fn from_parts(parts: TensorParts) -> Self {
        let TensorParts {
            shape,
            dtype,
            requires_grad,
            data,
            grad,
        } = parts;

        Self {
            inner: Arc::new(TensorInner {
                data,
                grad: grad.map(RwLock::new),
                shape,
                dtype,
                requires_grad,
                grad_fn: None,
            }),
        }
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a tensor whose contents the caller must not rely on.
    pub fn new(dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Self> {
        crate::creation::empty(dims, dtype, requires_grad)
    }

    /// Creates a tensor with buffers drawn from `alloc`.
    pub fn new_in<A>(dims: &[usize], dtype: DType, requires_grad: bool, alloc: &A) -> Result<Self>
    where
        A: Allocator + ?Sized,
    {
        crate::creation::empty_in(dims, dtype, requires_grad, alloc)
    }

    /// Creates a tensor filled with zeros.
    pub fn zeros(dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Self> {
        crate::creation::zeros(dims, dtype, requires_grad)
    }

    /// Creates a tensor filled with the dtype's numeric one.
    pub fn ones(dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Self> {
        crate::creation::ones(dims, dtype, requires_grad)
    }

    /// Creates a tensor filled with pseudo-random values drawn from `rng`.
    pub fn rand<R: Rng>(
        dims: &[usize],
        dtype: DType,
        requires_grad: bool,
        rng: &mut R,
    ) -> Result<Self> {
        crate::creation::rand(dims, dtype, requires_grad, rng)
    }

    /// Creates a tensor by copying the leading bytes of `src`.
    pub fn from_data(src: &[u8], dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Self> {
        crate::creation::from_data(src, dims, dtype, requires_grad)
    }

    /// Creates a tensor by copying typed elements.
    pub fn from_slice<T: Scalar>(src: &[T], dims: &[usize], requires_grad: bool) -> Result<Self> {
        crate::creation::from_slice(src, dims, requires_grad)
    }

    // =========================================================================
    // Reference Counting
    // =========================================================================

    /// Returns a new handle to the same tensor.
    #[must_use]
    pub fn retain(&self) -> Self {
        self.clone()
    }

    /// Gives up this handle; the tensor is torn down if it was the last one.
    pub fn release(self) {
        drop(self);
    }

    /// Tears the tensor down now if this is the only handle.
    ///
    /// # Errors
    /// Hands the tensor back unchanged when other handles are alive.
    pub fn destroy(self) -> core::result::Result<(), Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => {
                drop(inner);
                Ok(())
            }
            Err(inner) => {
                warn!(
                    ref_count = Arc::strong_count(&inner),
                    "refusing to destroy a shared tensor"
                );
                Err(Self { inner })
            }
        }
    }

    /// Returns the number of live handles.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns a non-owning handle that can observe teardown.
    #[must_use]
    pub fn downgrade(&self) -> WeakTensor {
        WeakTensor {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns true if both handles refer to the same tensor.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.inner.shape
    }

    /// Returns the axis extents.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        self.inner.shape.dims()
    }

    /// Returns the row-major strides.
    #[must_use]
    pub fn strides(&self) -> &[usize] {
        self.inner.shape.strides()
    }

    /// Returns the rank.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.inner.shape.ndim()
    }

    /// Returns the total number of elements.
    #[must_use]
    pub fn numel(&self) -> usize {
        self.inner.shape.size()
    }

    /// Returns the element dtype.
    #[must_use]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Returns the total size of the data buffer in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.numel() * self.dtype().size_of()
    }

    /// Returns whether a gradient buffer was reserved.
    #[must_use]
    pub fn requires_grad(&self) -> bool {
        self.inner.requires_grad
    }

    /// Returns the graph node that produces this tensor, if any.
    #[must_use]
    pub fn grad_fn(&self) -> Option<NodeId> {
        self.inner.grad_fn
    }

    // =========================================================================
    // Data Access
    // =========================================================================

    /// Returns the raw data bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.data.as_bytes()
    }

    /// Returns mutable data bytes if this is the only handle.
    ///
    /// Live `WeakTensor`s also block mutation, so this can return `None`
    /// while `ref_count()` is 1.
    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        Arc::get_mut(&mut self.inner).map(|inner| inner.data.as_bytes_mut())
    }

    /// Returns the elements as a typed slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if `T` does not match the tensor dtype.
    pub fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        TensorData::as_slice(self)
    }

    /// Copies the elements into a vector.
    pub fn to_vec<T: Scalar>(&self) -> Result<Vec<T>> {
        self.as_slice().map(<[T]>::to_vec)
    }

    /// Returns the element at `indices`.
    pub fn get<T: Scalar>(&self, indices: &[usize]) -> Result<T> {
        let offset = self.shape().linear_index(indices)?;
        Ok(self.as_slice::<T>()?[offset])
    }

    /// Returns a borrowed view of this tensor's data.
    #[must_use]
    pub fn view(&self) -> TensorView<'_> {
        TensorView::from_parts(self.as_bytes(), self.shape().clone(), self.dtype())
    }

    /// Locks the gradient buffer for reading.
    ///
    /// Returns `None` when the tensor does not require gradients.
    #[must_use]
    pub fn grad(&self) -> Option<RwLockReadGuard<'_, Buffer>> {
        self.inner.grad.as_ref().map(RwLock::read)
    }

    /// Locks the gradient buffer for writing.
    #[must_use]
    pub fn grad_mut(&self) -> Option<RwLockWriteGuard<'_, Buffer>> {
        self.inner.grad.as_ref().map(RwLock::write)
    }
}

impl TensorData for Tensor {
    fn shape(&self) -> &Shape {
        Tensor::shape(self)
    }

    fn dtype(&self) -> DType {
        Tensor::dtype(self)
    }

    fn as_bytes(&self) -> &[u8] {
        Tensor::as_bytes(self)
    }

    fn requires_grad(&self) -> bool {
        Tensor::requires_grad(self)
    }

    fn ref_count(&self) -> Option<usize> {
        Some(Tensor::ref_count(self))
    }
}

// =============================================================================
// Weak Handle
// =============================================================================

/// Non-owning handle; does not keep the tensor alive.
#[derive(Clone, Debug)]
pub struct WeakTensor {
    inner: Weak<TensorInner>,
}

impl WeakTensor {
    /// Returns a strong handle if the tensor is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Tensor> {
        self.inner.upgrade().map(|inner| Tensor { inner })
    }

    /// Returns true once the tensor has been torn down.
    #[must_use]
    pub fn is_dropped(&self) -> bool {
        self.inner.strong_count() == 0
    }
}

// =============================================================================
// Tests
// =============================================================================
