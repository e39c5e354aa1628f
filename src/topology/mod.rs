//! Mesh topology: node ids, cell shapes, the in-memory mesh and the walls
//! (faces) derived from it.
//!
//! Cells are identified by their position in the element list; walls and
//! neighbor pairs refer to cells by that index and to nodes by [`NodeId`].

pub mod cell_type;
pub mod mesh;
pub mod point;
pub mod walls;

pub use cell_type::CellType;
pub use mesh::{Element, Mesh2d};
pub use point::NodeId;
pub use walls::{MeshTopology, NeighborPair, Wall, WallCounts, WallKey};
