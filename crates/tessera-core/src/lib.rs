//! Tessera Core - Foundation Layer for Tessera Tensors
//!
//! This crate provides the building blocks underneath every Tessera tensor:
//! the closed set of element dtypes with their fixed byte widths, the error
//! taxonomy, and the allocators that hand out aligned, zeroed buffers.
//!
//! # Key Features
//! - `DType` size table (float32, float64, int32, int64, uint8)
//! - `Scalar` / `Numeric` traits linking Rust types to dtypes
//! - 8-byte aligned `Buffer` with typed views via `bytemuck`
//! - Pluggable `Allocator` with recoverable allocation failures
//!
//! # Example
//! ```rust
//! use tessera_core::{Allocator, DType, DefaultAllocator};
//!
//! let bytes = 6 * DType::F32.size_of();
//! let buffer = DefaultAllocator::new().allocate(bytes).unwrap();
//! assert_eq!(buffer.len(), 24);
//! ```
//!
//! @version 0.1.0
//! @author Tessera Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

// =============================================================================
// Modules
// =============================================================================

pub mod allocator;
pub mod buffer;
pub mod dtype;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use allocator::{Allocator, BudgetAllocator, DefaultAllocator};
pub use buffer::Buffer;
pub use dtype::{dtype_size, DType, Numeric, Scalar};
pub use error::{Error, Result};

// =============================================================================
// Prelude
// =============================================================================

/// Convenient imports for common usage.
pub mod prelude {
    pub use crate::allocator::{Allocator, DefaultAllocator};
    pub use crate::buffer::Buffer;
    pub use crate::dtype::{DType, Numeric, Scalar};
    pub use crate::error::{Error, Result};
}
