//! Shape - Tensor Geometry
//!
//! A `Shape` records the extent of every axis together with the row-major
//! strides derived from them. Strides are never supplied by callers, so the
//! only layout a `Shape` can describe is C-contiguous:
//! `strides[ndim - 1] == 1` and `strides[i] == strides[i + 1] * dims[i + 1]`.
//!
//! # Key Features
//! - Validation of rank, zero extents and element-count overflow
//! - Inline storage for up to six axes via `SmallVec`
//! - Linear offset computation for multi-dimensional indices
//!
//! @version 0.1.0
//! @author Tessera Development Team

use core::fmt;

use smallvec::SmallVec;

use tessera_core::error::{Error, Result};

/// Per-axis storage; ranks up to six stay inline.
pub type Dims = SmallVec<[usize; 6]>;

// =============================================================================
// Shape Struct
// =============================================================================

/// Validated, immutable geometry of an N-dimensional tensor.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Dims,
    strides: Dims,
    size: usize,
}

impl Shape {
    /// Builds a shape from axis extents, axis 0 outermost.
    ///
    /// # Errors
    /// Returns `InvalidShape` if `dims` is empty, any extent is zero, or the
    /// element count overflows `usize`.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::invalid_shape(dims, "rank must be at least 1"));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(Error::invalid_shape(
                dims,
                format!("dimension {axis} has zero extent"),
            ));
        }

        let overflow = || Error::invalid_shape(dims, "element count overflows usize");
        let size = numel(dims).ok_or_else(overflow)?;
        let strides = contiguous_strides(dims).ok_or_else(overflow)?;

        Ok(Self {
            dims: Dims::from_slice(dims),
            strides,
            size,
        })
    }

    /// Returns the extent of every axis.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the row-major strides, in elements.
    #[must_use]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the rank (always at least 1).
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the extent of one axis.
    #[must_use]
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Converts multi-dimensional indices to an element offset.
    ///
    /// # Errors
    /// Returns `InvalidIndexRank` if the number of indices differs from the
    /// rank, or `IndexOutOfBounds` if any index exceeds its axis.
    pub fn linear_index(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.ndim() {
            return Err(Error::InvalidIndexRank {
                expected: self.ndim(),
                actual: indices.len(),
            });
        }

        let mut offset = 0;
        for ((&idx, &dim), &stride) in indices.iter().zip(&self.dims).zip(&self.strides) {
            if idx >= dim {
                return Err(Error::IndexOutOfBounds {
                    index: idx,
                    size: dim,
                });
            }
            offset += idx * stride;
        }
        Ok(offset)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?}, strides={:?})", self.dims(), self.strides())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = Error;

    fn try_from(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }
}

// =============================================================================
// Shape Utilities
// =============================================================================

/// Product of all extents, or `None` on overflow.
#[must_use]
pub fn numel(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Computes row-major (C-order) strides for `dims`, or `None` on overflow.
#[must_use]
pub fn contiguous_strides(dims: &[usize]) -> Option<Dims> {
    let mut strides = Dims::from_elem(1, dims.len());
    for i in (0..dims.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1].checked_mul(dims[i + 1])?;
    }
    Some(strides)
}

// =============================================================================
// Tests
// =============================================================================
