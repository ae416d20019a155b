//! Allocator - Buffer Allocation Strategies
//!
//! Every tensor buffer is obtained through an `Allocator`. Allocation
//! failures are reported as `AllocationFailed` and never retried.
//!
//! @version 0.1.0
//! @author Tessera Development Team

use core::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::buffer::Buffer;
use crate::error::{Error, Result};

// =============================================================================
// Allocator Trait
// =============================================================================

/// Source of zero-initialised tensor buffers.
pub trait Allocator {
    /// Returns a short name used in log output.
    fn name(&self) -> &'static str;

    /// Allocates a zeroed buffer of `bytes` bytes.
    fn allocate(&self, bytes: usize) -> Result<Buffer>;
}

// =============================================================================
// Default Allocator
// =============================================================================

/// Allocator backed by the global heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAllocator;

impl DefaultAllocator {
    /// Creates a new default allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Allocator for DefaultAllocator {
    fn name(&self) -> &'static str {
        "heap"
    }

    fn allocate(&self, bytes: usize) -> Result<Buffer> {
        debug!(bytes, allocator = self.name(), "allocating buffer");
        Buffer::try_zeroed(bytes)
    }
}

// =============================================================================
// Budget Allocator
// =============================================================================

/// Heap allocator with a fixed byte budget.
///
/// Each successful allocation permanently consumes its size from the budget;
/// a request larger than what remains fails with `AllocationFailed`.
#[derive(Debug)]
pub struct BudgetAllocator {
    remaining: AtomicUsize,
}

impl BudgetAllocator {
    /// Creates an allocator that will serve at most `budget` bytes in total.
    #[must_use]
    pub const fn new(budget: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(budget),
        }
    }

    /// Returns the number of bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }
}

impl Allocator for BudgetAllocator {
    fn name(&self) -> &'static str {
        "budget"
    }

    fn allocate(&self, bytes: usize) -> Result<Buffer> {
        debug!(
            bytes,
            remaining = self.remaining(),
            allocator = self.name(),
            "allocating buffer"
        );
        self.remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| {
                left.checked_sub(bytes)
            })
            .map_err(|_| Error::AllocationFailed { bytes })?;

        Buffer::try_zeroed(bytes).map_err(|err| {
            self.remaining.fetch_add(bytes, Ordering::AcqRel);
            err
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
