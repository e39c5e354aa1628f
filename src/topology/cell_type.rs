//! Cell type metadata for 2D mesh elements.

use serde::{Deserialize, Serialize};

/// The two element shapes a 2D finite-volume mesh may mix.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 3-node simplex.
    Triangle,
    /// 4-node tensor-product cell.
    Quadrilateral,
}

impl CellType {
    /// Map a Gmsh element type code to a supported 2D cell type.
    ///
    /// Points, lines, 3D solids and higher-order elements return `None`.
    pub fn from_gmsh_code(code: u32) -> Option<Self> {
        match code {
            2 => Some(CellType::Triangle),
            3 => Some(CellType::Quadrilateral),
            _ => None,
        }
    }

    /// Gmsh element type code.
    pub fn gmsh_code(self) -> u32 {
        match self {
            CellType::Triangle => 2,
            CellType::Quadrilateral => 3,
        }
    }

    /// Infer the cell type from the number of vertices.
    pub fn from_vertex_count(n: usize) -> Option<Self> {
        match n {
            3 => Some(CellType::Triangle),
            4 => Some(CellType::Quadrilateral),
            _ => None,
        }
    }

    /// Number of vertices (and therefore walls).
    pub fn vertex_count(self) -> usize {
        match self {
            CellType::Triangle => 3,
            CellType::Quadrilateral => 4,
        }
    }
}
