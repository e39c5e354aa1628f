//! Graph algorithms over the cell adjacency of a mesh.

pub mod adjacency_graph;
pub mod boundary;
pub mod rcm;
pub mod renumber;

pub use rcm::{reduce_bandwidth, reverse_cuthill_mckee};
pub use renumber::reorder_cells;
