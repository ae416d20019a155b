//! Tensor Creation Functions
//!
//! Every constructor follows the same path: validate the shape, allocate the
//! data buffer (and the gradient buffer when `requires_grad`), fill the data
//! once, then freeze the result into a shared `Tensor`. Any failure drops the
//! buffers allocated so far before the error is returned.
//!
//! # Key Features
//! - `empty`, `zeros`, `ones`, `rand`, `from_data`, `from_slice`
//! - Per-dtype fill dispatch for ones and random values
//! - Caller-supplied or seeded random generators
//! - Allocator injection through a `*_in` variant of every constructor
//!
//! @version 0.1.0
//! @author Tessera Development Team

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{trace, warn};

use tessera_core::allocator::{Allocator, DefaultAllocator};
use tessera_core::buffer::Buffer;
use tessera_core::dtype::{DType, Numeric, Scalar};
use tessera_core::error::Result;

use crate::tensor::{Tensor, TensorParts};

/// Exclusive upper bound for random int32/int64 elements.
pub const RAND_INT_BOUND: i64 = 100;

// =============================================================================
// Construction Pipeline
// =============================================================================

fn build<A, F>(
    op: &'static str,
    dims: &[usize],
    dtype: DType,
    requires_grad: bool,
    alloc: &A,
    fill: F,
) -> Result<Tensor>
where
    A: Allocator + ?Sized,
    F: FnOnce(&mut Buffer) -> Result<()>,
{
    let parts = TensorParts::allocate(dims, dtype, requires_grad, alloc).and_then(|mut parts| {
        fill(&mut parts.data)?;
        Ok(parts)
    });

    match parts {
        Ok(parts) => {
            let tensor = Tensor::from_parts(parts);
            trace!(
                op,
                dims = ?dims,
                dtype = %dtype,
                bytes = tensor.byte_size(),
                requires_grad,
                "created tensor"
            );
            Ok(tensor)
        }
        Err(err) => {
            warn!(op, dims = ?dims, dtype = %dtype, error = %err, "tensor construction failed");
            Err(err)
        }
    }
}

// =============================================================================
// Uninitialised / Zero / One
// =============================================================================

/// Creates a tensor without defining its contents.
///
/// Buffers come from a zeroing allocator, but callers must not rely on the
/// contents; use [`zeros`] when zeros are required.
pub fn empty(dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Tensor> {
    empty_in(dims, dtype, requires_grad, &DefaultAllocator)
}

/// Creates a tensor without defining its contents, allocating from `alloc`.
pub fn empty_in<A>(dims: &[usize], dtype: DType, requires_grad: bool, alloc: &A) -> Result<Tensor>
where
    A: Allocator + ?Sized,
{
    build("empty", dims, dtype, requires_grad, alloc, |_| Ok(()))
}

/// Creates a tensor filled with zeros.
///
/// # Example
/// ```rust
/// use tessera_tensor::{zeros, DType};
///
/// let t = zeros(&[2, 2], DType::F32, true).unwrap();
/// assert_eq!(t.to_vec::<f32>().unwrap(), vec![0.0; 4]);
/// ```
pub fn zeros(dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Tensor> {
    zeros_in(dims, dtype, requires_grad, &DefaultAllocator)
}

/// Creates a tensor filled with zeros, allocating from `alloc`.
pub fn zeros_in<A>(dims: &[usize], dtype: DType, requires_grad: bool, alloc: &A) -> Result<Tensor>
where
    A: Allocator + ?Sized,
{
    build("zeros", dims, dtype, requires_grad, alloc, |data| {
        data.fill_zero();
        Ok(())
    })
}

/// Creates a tensor with every element set to the dtype's numeric one.
pub fn ones(dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Tensor> {
    ones_in(dims, dtype, requires_grad, &DefaultAllocator)
}

/// Creates a tensor of ones, allocating from `alloc`.
pub fn ones_in<A>(dims: &[usize], dtype: DType, requires_grad: bool, alloc: &A) -> Result<Tensor>
where
    A: Allocator + ?Sized,
{
    build("ones", dims, dtype, requires_grad, alloc, |data| {
        fill_ones(data, dtype)
    })
}

fn fill_one<T: Numeric>(data: &mut Buffer) -> Result<()> {
    data.fill(T::ONE)
}

fn fill_ones(data: &mut Buffer, dtype: DType) -> Result<()> {
    match dtype {
        DType::F32 => fill_one::<f32>(data),
        DType::F64 => fill_one::<f64>(data),
        DType::I32 => fill_one::<i32>(data),
        DType::I64 => fill_one::<i64>(data),
        DType::U8 => fill_one::<u8>(data),
    }
}

// =============================================================================
// Random Initialization
// =============================================================================

/// Creates a tensor of pseudo-random values drawn from `rng`.
///
/// Floats are uniform in `[0, 1)`, int32/int64 uniform in `[0, 100)` and
/// uint8 uniform over its full range `[0, 256)`.
pub fn rand<R: Rng>(dims: &[usize], dtype: DType, requires_grad: bool, rng: &mut R) -> Result<Tensor> {
    rand_in(dims, dtype, requires_grad, rng, &DefaultAllocator)
}

/// Creates a random tensor, allocating from `alloc`.
pub fn rand_in<R, A>(
    dims: &[usize],
    dtype: DType,
    requires_grad: bool,
    rng: &mut R,
    alloc: &A,
) -> Result<Tensor>
where
    R: Rng,
    A: Allocator + ?Sized,
{
    build("rand", dims, dtype, requires_grad, alloc, |data| {
        fill_random(data, dtype, rng)
    })
}

/// Creates a random tensor from a `StdRng` seeded with `seed`.
///
/// The same seed yields the same contents for a given build of this crate.
pub fn rand_seeded(dims: &[usize], dtype: DType, requires_grad: bool, seed: u64) -> Result<Tensor> {
    let mut rng = StdRng::seed_from_u64(seed);
    rand(dims, dtype, requires_grad, &mut rng)
}

fn fill_random<R: Rng>(data: &mut Buffer, dtype: DType, rng: &mut R) -> Result<()> {
    match dtype {
        DType::F32 => data
            .as_slice_mut::<f32>()?
            .iter_mut()
            .for_each(|v| *v = rng.gen()),
        DType::F64 => data
            .as_slice_mut::<f64>()?
            .iter_mut()
            .for_each(|v| *v = rng.gen()),
        DType::I32 => data
            .as_slice_mut::<i32>()?
            .iter_mut()
            .for_each(|v| *v = rng.gen_range(0..RAND_INT_BOUND as i32)),
        DType::I64 => data
            .as_slice_mut::<i64>()?
            .iter_mut()
            .for_each(|v| *v = rng.gen_range(0..RAND_INT_BOUND)),
        DType::U8 => rng.fill(data.as_slice_mut::<u8>()?),
    }
    Ok(())
}

// =============================================================================
// Copying Constructors
// =============================================================================

/// Creates a tensor from the first `size * dtype.size_of()` bytes of `src`.
///
/// # Errors
/// Returns `InsufficientData` if `src` is too short; trailing bytes are
/// ignored.
pub fn from_data(src: &[u8], dims: &[usize], dtype: DType, requires_grad: bool) -> Result<Tensor> {
    from_data_in(src, dims, dtype, requires_grad, &DefaultAllocator)
}

/// Creates a tensor from the leading bytes of `src`, allocating from `alloc`.
pub fn from_data_in<A>(
    src: &[u8],
    dims: &[usize],
    dtype: DType,
    requires_grad: bool,
    alloc: &A,
) -> Result<Tensor>
where
    A: Allocator + ?Sized,
{
    build("from_data", dims, dtype, requires_grad, alloc, |data| {
        data.copy_from(src)
    })
}

/// Creates a tensor of `T::DTYPE` from typed elements.
///
/// # Example
/// ```rust
/// use tessera_tensor::from_slice;
///
/// let t = from_slice(&[1.0_f32, 2.0, 3.0, 4.0], &[2, 2], false).unwrap();
/// assert_eq!(t.get::<f32>(&[1, 1]).unwrap(), 4.0);
/// ```
pub fn from_slice<T: Scalar>(src: &[T], dims: &[usize], requires_grad: bool) -> Result<Tensor> {
    from_data(bytemuck::cast_slice(src), dims, T::DTYPE, requires_grad)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{BudgetAllocator, Error};

    #[test]
    fn test_zeros_every_dtype() {
        for dtype in DType::ALL {
            let t = zeros(&[3, 2], dtype, false).unwrap();
            assert_eq!(t.as_bytes().len(), 6 * dtype.size_of());
            assert!(t.as_bytes().iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_ones_every_dtype() {
        let dims = [2, 3];
        assert!(ones(&dims, DType::F32, false).unwrap().as_slice::<f32>().unwrap().iter().all(|&v| v == 1.0));
        assert!(ones(&dims, DType::F64, false).unwrap().as_slice::<f64>().unwrap().iter().all(|&v| v == 1.0));
        assert!(ones(&dims, DType::I32, false).unwrap().as_slice::<i32>().unwrap().iter().all(|&v| v == 1));
        assert!(ones(&dims, DType::I64, false).unwrap().as_slice::<i64>().unwrap().iter().all(|&v| v == 1));
        assert_eq!(ones(&dims, DType::U8, false).unwrap().as_bytes(), &[1; 6]);
    }

    #[test]
    fn test_ones_leaves_grad_zeroed() {
        let t = ones(&[4], DType::F32, true).unwrap();
        assert_eq!(t.grad().unwrap().as_slice::<f32>().unwrap(), &[0.0; 4]);
    }

    #[test]
    fn test_rand_ranges() {
        let f = rand_seeded(&[256], DType::F32, false, 7).unwrap();
        assert!(f.as_slice::<f32>().unwrap().iter().all(|v| (0.0..1.0).contains(v)));

        let d = rand_seeded(&[256], DType::F64, false, 7).unwrap();
        assert!(d.as_slice::<f64>().unwrap().iter().all(|v| (0.0..1.0).contains(v)));

        let i = rand_seeded(&[256], DType::I32, false, 7).unwrap();
        assert!(i.as_slice::<i32>().unwrap().iter().all(|v| (0..100).contains(v)));

        let l = rand_seeded(&[256], DType::I64, false, 7).unwrap();
        assert!(l.as_slice::<i64>().unwrap().iter().all(|v| (0..100).contains(v)));

        let b = rand_seeded(&[4096], DType::U8, false, 7).unwrap();
        assert!(b.as_bytes().iter().any(|&v| v > 100));
    }

    #[test]
    fn test_rand_is_reproducible() {
        let a = rand_seeded(&[4, 4], DType::F64, false, 42).unwrap();
        let b = rand_seeded(&[4, 4], DType::F64, false, 42).unwrap();
        let c = rand_seeded(&[4, 4], DType::F64, false, 43).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn test_rand_with_caller_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = rand(&[8], DType::I64, false, &mut rng).unwrap();
        let b = rand(&[8], DType::I64, false, &mut rng).unwrap();
        // The generator advances between calls.
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_from_data_copies_prefix() {
        let src: Vec<u8> = (1..=10).collect();
        let t = from_data(&src, &[2, 4], DType::U8, false).unwrap();
        assert_eq!(t.as_bytes(), &src[..8]);
    }

    #[test]
    fn test_from_data_short_source() {
        let err = from_data(&[0; 15], &[2, 2], DType::F32, false).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientData {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_from_slice_typed() {
        let t = from_slice(&[1.0_f32, 2.0, 3.0, 4.0], &[2, 2], false).unwrap();
        assert_eq!(t.dtype(), DType::F32);
        assert_eq!(t.to_vec::<f32>().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(empty(&[], DType::F32, false), Err(Error::InvalidShape { .. })));
        assert!(matches!(zeros(&[2, 0], DType::F32, true), Err(Error::InvalidShape { .. })));
    }

    #[test]
    fn test_budget_failure_on_data_buffer() {
        let alloc = BudgetAllocator::new(8);
        let err = zeros_in(&[4], DType::F32, false, &alloc).unwrap_err();
        assert_eq!(err, Error::AllocationFailed { bytes: 16 });
        assert_eq!(alloc.remaining(), 8);
    }

    #[test]
    fn test_rand_in_budget() {
        let mut rng = StdRng::seed_from_u64(3);
        let alloc = BudgetAllocator::new(48);
        let err = rand_in(&[4], DType::F64, true, &mut rng, &alloc).unwrap_err();
        assert_eq!(err, Error::AllocationFailed { bytes: 32 });

        let alloc = BudgetAllocator::new(64);
        let t = rand_in(&[4], DType::F64, true, &mut rng, &alloc).unwrap();
        assert_eq!(alloc.remaining(), 0);
        assert!(t.as_slice::<f64>().unwrap().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_from_data_in_budget() {
        let src = [1_u8, 2, 3, 4];
        let alloc = BudgetAllocator::new(7);
        let err = from_data_in(&src, &[2, 2], DType::U8, true, &alloc).unwrap_err();
        assert_eq!(err, Error::AllocationFailed { bytes: 4 });
        assert_eq!(alloc.remaining(), 3);

        let alloc = BudgetAllocator::new(4);
        let t = from_data_in(&src, &[2, 2], DType::U8, false, &alloc).unwrap();
        assert_eq!(t.as_bytes(), &src);
    }

    #[test]
    fn test_ones_in_budget() {
        let alloc = BudgetAllocator::new(64);
        let t = ones_in(&[2, 2], DType::F64, true, &alloc).unwrap();
        assert_eq!(alloc.remaining(), 0);
        assert_eq!(t.to_vec::<f64>().unwrap(), vec![1.0; 4]);
    }
}
