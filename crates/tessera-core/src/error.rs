//! Error Types - Tessera Core Error Handling
//!
//! A single error enum covers every failure a tensor construction or typed
//! access can report. Construction errors are surfaced once, after every
//! buffer allocated so far has been released.
//!
//! @version 0.1.0
//! @author Tessera Development Team

use thiserror::Error;

use crate::dtype::DType;

// =============================================================================
// Error Types
// =============================================================================

/// The main error type for Tessera operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested dimensions do not describe a valid tensor.
    #[error("Invalid shape {dims:?}: {reason}")]
    InvalidShape {
        /// The rejected dimensions.
        dims: Vec<usize>,
        /// Why they were rejected.
        reason: String,
    },

    /// A dtype code or name outside the supported set.
    #[error("Invalid dtype: {value}")]
    InvalidDType {
        /// The unrecognized value, as text.
        value: String,
    },

    /// An allocator could not provide the requested memory.
    #[error("Memory allocation failed: requested {bytes} bytes")]
    AllocationFailed {
        /// The requested size in bytes.
        bytes: usize,
    },

    /// A source buffer is shorter than the tensor it should fill.
    #[error("Insufficient data: expected at least {expected} bytes, got {actual}")]
    InsufficientData {
        /// Bytes required.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Typed access with an element type that does not match the tensor.
    #[error("DType mismatch: expected {expected}, got {actual}")]
    DTypeMismatch {
        /// The tensor's dtype.
        expected: DType,
        /// The dtype that was requested.
        actual: DType,
    },

    /// Wrong number of indices for the tensor rank.
    #[error("Expected {expected} indices, got {actual}")]
    InvalidIndexRank {
        /// The tensor rank.
        expected: usize,
        /// Number of indices supplied.
        actual: usize,
    },

    /// Index out of bounds.
    #[error("Index out of bounds: index {index} for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The size of the dimension.
        size: usize,
    },

    /// Bytes cannot be reinterpreted as the requested element type.
    #[error("Layout error: {message}")]
    Layout {
        /// Description of the layout problem.
        message: String,
    },

    /// Malformed creation options.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

// =============================================================================
// Result Type
// =============================================================================

/// A specialized Result type for Tessera operations.
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Helper Functions
// =============================================================================

impl Error {
    /// Creates a new invalid shape error.
    #[must_use]
    pub fn invalid_shape(dims: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            dims: dims.to_vec(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid dtype error.
    #[must_use]
    pub fn invalid_dtype(value: impl Into<String>) -> Self {
        Self::InvalidDType {
            value: value.into(),
        }
    }

    /// Creates a new layout error.
    #[must_use]
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this error was raised while allocating memory.
    #[must_use]
    pub const fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
