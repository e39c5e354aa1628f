//! # mesh-ordering
//!
//! Topology and bandwidth-reduction engine for unstructured 2D
//! finite-volume meshes made of triangles and quadrilaterals.
//!
//! ## Features
//! - Gmsh v2 ASCII mesh reading and atomic writing ([`io::gmsh`])
//! - Wall (face) derivation, interior/boundary classification and
//!   sort-based cell neighbor discovery ([`topology::walls`])
//! - Reverse Cuthill-McKee reordering of the cell adjacency graph
//!   ([`algs::rcm`], [`algs::renumber`])
//! - Ordered boundary node sequences for open-boundary zones
//!   ([`algs::boundary`])
//! - External mesh generator invocation with line-by-line log forwarding
//!   ([`mesher`])
//!
//! ## Determinism
//!
//! Every output depends only on the input element order: walls are sorted
//! with stable sorts, neighbor pairs are sorted by cell index and all RCM
//! ties break on cell index. Running the same workflow twice produces the
//! same files byte for byte.
//!
//! ## Logging
//!
//! Progress and diagnostics go through the [`log`] facade; install any
//! logger in the host application to see them.

pub mod algs;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod mesher;
pub mod session;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::adjacency_graph::CellGraph;
    pub use crate::algs::boundary::{order_nodes, order_zone_nodes};
    pub use crate::algs::rcm::{CellPermutation, reduce_bandwidth, reverse_cuthill_mckee};
    pub use crate::algs::renumber::{CellReordering, apply_permutation, reorder_cells};
    pub use crate::geometry::polygon::{BoundingBox, Polygon, Region};
    pub use crate::io::gmsh::{GmshReader, GmshWriteOptions, GmshWriter};
    pub use crate::io::{MeshReader, MeshWriter};
    pub use crate::mesh_error::MeshOrderError;
    pub use crate::session::{OrderingSession, SessionOptions};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::mesh::{Element, Mesh2d};
    pub use crate::topology::point::NodeId;
    pub use crate::topology::walls::{NeighborPair, WallCounts, WallKey, build_neighbors};
}
