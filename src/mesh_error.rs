//! MeshOrderError: unified error type for mesh-ordering public APIs
//!
//! Every fallible operation in the crate reports through this enum so callers
//! can abort a workflow step without anything being written.

use crate::topology::point::NodeId;
use thiserror::Error;

/// Unified error type for mesh-ordering operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshOrderError {
    /// Underlying I/O failure (stringified so the error stays `Clone`).
    #[error("I/O error: {0}")]
    Io(String),
    /// Malformed or truncated mesh exchange file.
    #[error("mesh format error: {0}")]
    Format(String),
    /// Node ids are 1-based; 0 is reserved.
    #[error("node id must be non-zero")]
    InvalidNodeId,
    /// An element references a node missing from the node table.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// A cell index beyond the element list.
    #[error("cell {cell} out of range for {cells} cells")]
    CellOutOfRange { cell: usize, cells: usize },
    /// An element with neither 3 nor 4 vertices.
    #[error("unsupported topology: cell {cell} has {vertices} vertices (expected 3 or 4)")]
    UnsupportedTopology { cell: usize, vertices: usize },
    /// An element listing the same node twice.
    #[error("degenerate element: cell {cell} repeats a node id")]
    DegenerateElement { cell: usize },
    /// More than two cells share one wall.
    #[error("topology error: wall ({id1}, {id2}) is shared by {owners} cells")]
    NonManifoldWall {
        id1: NodeId,
        id2: NodeId,
        owners: usize,
    },
    /// Boundary edges that do not form a single simple path.
    #[error("topology error: {0}")]
    BoundaryPath(String),
    /// A cell permutation that is not a bijection over `[0, n)`.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),
    /// Polygon or other geometric input rejected.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// External mesh generator exited unsuccessfully.
    #[error("external tool `{program}` failed with {status}")]
    ExternalTool { program: String, status: String },
    /// External mesh generator exceeded its configured timeout.
    #[error("external tool `{program}` did not finish within {seconds}s")]
    ExternalToolTimeout { program: String, seconds: u64 },
}

impl From<std::io::Error> for MeshOrderError {
    fn from(err: std::io::Error) -> Self {
        MeshOrderError::Io(err.to_string())
    }
}
