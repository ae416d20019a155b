//! Node - Graph Node Handles
//!
//! A tensor names the computation-graph node that produced it by index only.
//! Nodes live in an arena owned by the graph, so tensors never own graph
//! state and no reference cycle between the two can form.
//!
//! @version 0.1.0
//! @author Tessera Development Team

use core::fmt;

// =============================================================================
// NodeId
// =============================================================================

/// Index of a node in a computation-graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Wraps an arena slot index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the arena slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
