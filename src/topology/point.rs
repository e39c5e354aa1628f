//! `NodeId`: a strong, zero-cost handle for mesh nodes
//!
//! Node ids in the mesh exchange format are 1-based. `NodeId` wraps a
//! nonzero `u64` so that 0 can never sneak in as a valid id, and exposes
//! [`NodeId::index`] for the 0-based position in the node table.

use crate::mesh_error::MeshOrderError;
use std::{fmt, num::NonZeroU64};

/// 1-based node identifier.
///
/// # Memory layout
/// `repr(transparent)` over `NonZeroU64`, so `Option<NodeId>` is the same
/// size as a `u64`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(NonZeroU64);

impl NodeId {
    /// Creates a new `NodeId` from a raw `u64` value.
    ///
    /// # Errors
    /// Returns [`MeshOrderError::InvalidNodeId`] if `raw == 0`.
    ///
    /// # Example
    /// ```rust
    /// # use mesh_ordering::topology::point::NodeId;
    /// let n = NodeId::new(1).unwrap();
    /// assert_eq!(n.get(), 1);
    /// assert_eq!(n.index(), 0);
    /// ```
    #[inline]
    pub fn new(raw: u64) -> Result<Self, MeshOrderError> {
        NonZeroU64::new(raw)
            .map(NodeId)
            .ok_or(MeshOrderError::InvalidNodeId)
    }

    /// Node id for the 0-based table position `index`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        // index + 1 is never zero
        NodeId(NonZeroU64::MIN.saturating_add(index as u64))
    }

    /// Returns the raw 1-based id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Returns the 0-based position in the node table.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.get()).finish()
    }
}

/// Prints the raw integer, as written in mesh files.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
