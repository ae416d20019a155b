//! Tessera Tensor - Reference-Counted N-Dimensional Arrays
//!
//! This crate provides the `Tensor` record: a contiguous row-major buffer
//! described by a `Shape` and a `DType`, an optional gradient buffer of the
//! same size, and shared ownership through reference-counted handles.
//!
//! # Key Features
//! - Validated shapes with precomputed row-major strides
//! - Constructors for empty, zero, one, random and copied data
//! - Explicit `retain` / `release` / `destroy` lifetime operations
//! - Borrowed `TensorView`s over externally owned bytes
//! - TOML-configurable `TensorOptions`
//!
//! # Example
//! ```rust
//! use tessera_tensor::{zeros, DType, Tensor};
//!
//! let t = zeros(&[2, 3], DType::F32, false).unwrap();
//! assert_eq!(t.strides(), &[3, 1]);
//! assert_eq!(t.byte_size(), 24);
//!
//! let u = Tensor::ones(&[4], DType::U8, true).unwrap();
//! assert_eq!(u.as_bytes(), &[1, 1, 1, 1]);
//! assert!(u.grad().is_some());
//! ```
//!
//! @version 0.1.0
//! @author Tessera Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

// =============================================================================
// Modules
// =============================================================================

pub mod creation;
pub mod display;
pub mod lifecycle;
pub mod node;
pub mod options;
pub mod shape;
pub mod tensor;
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use creation::*;
pub use node::NodeId;
pub use options::TensorOptions;
pub use shape::{contiguous_strides, numel, Dims, Shape};
pub use tensor::{Tensor, WeakTensor};
pub use view::{TensorData, TensorView};

pub use tessera_core::{
    dtype_size, Allocator, BudgetAllocator, Buffer, DType, DefaultAllocator, Error, Numeric,
    Result, Scalar,
};

// =============================================================================
// Prelude
// =============================================================================

/// Convenient imports for common usage.
pub mod prelude {
    pub use crate::creation::{from_data, from_slice, ones, rand, rand_seeded, zeros};
    pub use crate::options::TensorOptions;
    pub use crate::shape::Shape;
    pub use crate::tensor::Tensor;
    pub use crate::view::{TensorData, TensorView};

    pub use tessera_core::{DType, Error, Result, Scalar};
}
