//! Buffer - Aligned Byte Storage for Tensors
//!
//! A `Buffer` is an exclusively owned, zero-initialised block of bytes whose
//! start is aligned to 8 bytes, so it can be reinterpreted as a slice of any
//! supported element type without copying.
//!
//! # Example
//! ```rust
//! use tessera_core::Buffer;
//!
//! let mut buffer = Buffer::try_zeroed(16).unwrap();
//! buffer.fill(2.5_f32).unwrap();
//! assert_eq!(buffer.as_slice::<f32>().unwrap(), &[2.5; 4]);
//! ```
//!
//! @version 0.1.0
//! @author Tessera Development Team

use core::fmt;

use crate::dtype::Scalar;
use crate::error::{Error, Result};

/// Backing word; fixes the buffer alignment at 8 bytes.
type Word = u64;

const WORD_BYTES: usize = core::mem::size_of::<Word>();

// =============================================================================
// Buffer Struct
// =============================================================================

/// Owned, 8-byte aligned byte buffer.
pub struct Buffer {
    words: Vec<Word>,
    len: usize,
}

impl Buffer {
    /// Allocates `len` zeroed bytes.
    ///
    /// # Errors
    /// Returns `AllocationFailed` if the system allocator cannot satisfy the
    /// request.
    pub fn try_zeroed(len: usize) -> Result<Self> {
        let word_count = len.div_ceil(WORD_BYTES);
        let mut words = Vec::new();
        words
            .try_reserve_exact(word_count)
            .map_err(|_| Error::AllocationFailed { bytes: len })?;
        words.resize(word_count, 0);
        Ok(Self { words, len })
    }

    /// Returns the length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the buffer contents as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<Word, u8>(&self.words)[..self.len]
    }

    /// Returns the buffer contents as mutable bytes.
    #[must_use]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut::<Word, u8>(&mut self.words)[..self.len]
    }

    /// Reinterprets the buffer as a slice of `T`.
    ///
    /// # Errors
    /// Returns a layout error if the byte length is not a multiple of
    /// `size_of::<T>()`.
    pub fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        bytemuck::try_cast_slice(self.as_bytes()).map_err(|e| layout_error::<T>(self.len, e))
    }

    /// Reinterprets the buffer as a mutable slice of `T`.
    pub fn as_slice_mut<T: Scalar>(&mut self) -> Result<&mut [T]> {
        let len = self.len;
        bytemuck::try_cast_slice_mut(self.as_bytes_mut()).map_err(|e| layout_error::<T>(len, e))
    }

    /// Sets every byte to zero.
    pub fn fill_zero(&mut self) {
        self.as_bytes_mut().fill(0);
    }

    /// Sets every element, viewed as `T`, to `value`.
    pub fn fill<T: Scalar>(&mut self, value: T) -> Result<()> {
        self.as_slice_mut::<T>()?.fill(value);
        Ok(())
    }

    /// Copies the first `self.len()` bytes of `src` into this buffer.
    ///
    /// # Errors
    /// Returns `InsufficientData` if `src` is shorter than the buffer.
    pub fn copy_from(&mut self, src: &[u8]) -> Result<()> {
        if src.len() < self.len {
            return Err(Error::InsufficientData {
                expected: self.len,
                actual: src.len(),
            });
        }
        let len = self.len;
        self.as_bytes_mut().copy_from_slice(&src[..len]);
        Ok(())
    }
}

fn layout_error<T: Scalar>(len: usize, err: bytemuck::PodCastError) -> Error {
    Error::layout(format!(
        "cannot view {len} bytes as {}: {err:?}",
        T::DTYPE
    ))
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer").field("len", &self.len).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
