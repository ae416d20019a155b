//! Data Types - Tessera Element Types
//!
//! Defines the closed set of element types a tensor buffer can hold and the
//! traits that tie Rust scalar types to them. The byte width of every dtype
//! is fixed; buffer sizes are always `elements * dtype.size_of()`.
//!
//! # Key Features
//! - Runtime dtype tag via the `DType` enum
//! - Fixed size table (float32/int32 = 4, float64/int64 = 8, uint8 = 1)
//! - Fallible decoding from raw codes and names (`InvalidDType`)
//! - `Scalar` / `Numeric` traits for typed access and fills
//!
//! @version 0.1.0
//! @author Tessera Development Team

use core::fmt::{self, Debug};
use core::str::FromStr;

use bytemuck::{Pod, Zeroable};
use num_traits::{Num, NumCast, One, Zero};
use serde::Serialize;

use crate::error::{Error, Result};

// =============================================================================
// DType Enum
// =============================================================================

/// Runtime tag for the element type of a tensor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum DType {
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 8-bit unsigned integer.
    U8,
}

impl DType {
    /// All supported dtypes, in code order.
    pub const ALL: [DType; 5] = [Self::F32, Self::F64, Self::I32, Self::I64, Self::U8];

    /// Returns the size in bytes of one element of this dtype.
    #[must_use]
    pub const fn size_of(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::F32 | Self::I32 => 4,
            Self::F64 | Self::I64 => 8,
        }
    }

    /// Returns true for float32 and float64.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns true for the integer dtypes.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Returns the canonical name of this dtype.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U8 => "uint8",
        }
    }

    /// Returns the stable numeric code of this dtype.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::F32 => 0,
            Self::F64 => 1,
            Self::I32 => 2,
            Self::I64 => 3,
            Self::U8 => 4,
        }
    }

    /// Decodes a numeric dtype code.
    ///
    /// # Errors
    /// Returns `InvalidDType` for any code outside `0..=4`.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::F32),
            1 => Ok(Self::F64),
            2 => Ok(Self::I32),
            3 => Ok(Self::I64),
            4 => Ok(Self::U8),
            _ => Err(Error::invalid_dtype(code.to_string())),
        }
    }
}

impl Default for DType {
    fn default() -> Self {
        Self::F32
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float32" | "f32" => Ok(Self::F32),
            "float64" | "f64" => Ok(Self::F64),
            "int32" | "i32" => Ok(Self::I32),
            "int64" | "i64" => Ok(Self::I64),
            "uint8" | "u8" => Ok(Self::U8),
            _ => Err(Error::invalid_dtype(s)),
        }
    }
}

impl TryFrom<i32> for DType {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<DType> for &'static str {
    fn from(dtype: DType) -> Self {
        dtype.name()
    }
}

/// Returns the byte width of one element of `dtype`.
#[must_use]
pub const fn dtype_size(dtype: DType) -> usize {
    dtype.size_of()
}

// =============================================================================
// Scalar Trait
// =============================================================================

/// A Rust type that can be stored in a tensor buffer.
pub trait Scalar: Copy + Debug + Default + Send + Sync + Pod + Zeroable + 'static {
    /// The runtime dtype for this scalar type.
    const DTYPE: DType;

    /// Returns the dtype for this type.
    #[must_use]
    fn dtype() -> DType {
        Self::DTYPE
    }
}

// =============================================================================
// Numeric Trait
// =============================================================================

/// Scalar types with arithmetic identities.
pub trait Numeric: Scalar + Num + NumCast + PartialOrd + Zero + One {
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;
}

macro_rules! impl_numeric {
    ($ty:ty, $dtype:expr, $zero:expr, $one:expr) => {
        impl Scalar for $ty {
            const DTYPE: DType = $dtype;
        }

        impl Numeric for $ty {
            const ZERO: Self = $zero;
            const ONE: Self = $one;
        }
    };
}

impl_numeric!(f32, DType::F32, 0.0, 1.0);
impl_numeric!(f64, DType::F64, 0.0, 1.0);
impl_numeric!(i32, DType::I32, 0, 1);
impl_numeric!(i64, DType::I64, 0, 1);
impl_numeric!(u8, DType::U8, 0, 1);

// =============================================================================
// Tests
// =============================================================================
