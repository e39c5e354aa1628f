//! In-memory 2D mesh: a node table plus an ordered element list.
//!
//! The position of an element in [`Mesh2d::elements`] is its cell index,
//! the identity used by every adjacency structure in the crate.

use crate::mesh_error::MeshOrderError;
use crate::topology::cell_type::CellType;
use crate::topology::point::NodeId;

/// Ordered node ids of one cell; successive pairs (with wrap-around) are its walls.
pub type Element = Vec<NodeId>;

/// Nodes and elements of an unstructured 2D mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh2d {
    /// Coordinates indexed by `NodeId::index()`.
    pub nodes: Vec<[f64; 2]>,
    /// Cells in solver order.
    pub elements: Vec<Element>,
}

impl Mesh2d {
    pub fn new(nodes: Vec<[f64; 2]>, elements: Vec<Element>) -> Self {
        Self { nodes, elements }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.elements.len()
    }

    /// Coordinates of `node`.
    pub fn coord(&self, node: NodeId) -> Result<[f64; 2], MeshOrderError> {
        self.nodes
            .get(node.index())
            .copied()
            .ok_or(MeshOrderError::UnknownNode(node))
    }

    /// Vertex-average centroid of cell `cell`.
    pub fn centroid(&self, cell: usize) -> Result<[f64; 2], MeshOrderError> {
        let element = self
            .elements
            .get(cell)
            .ok_or(MeshOrderError::CellOutOfRange {
                cell,
                cells: self.elements.len(),
            })?;
        if element.is_empty() {
            return Err(MeshOrderError::UnsupportedTopology { cell, vertices: 0 });
        }
        let mut c = [0.0, 0.0];
        for &n in element {
            let [x, y] = self.coord(n)?;
            c[0] += x;
            c[1] += y;
        }
        let k = element.len() as f64;
        Ok([c[0] / k, c[1] / k])
    }

    /// Check that every element is a triangle or quad with distinct vertices
    /// that all exist in the node table.
    pub fn validate(&self) -> Result<(), MeshOrderError> {
        for (cell, element) in self.elements.iter().enumerate() {
            check_element(cell, element)?;
            for &n in element {
                if n.index() >= self.nodes.len() {
                    return Err(MeshOrderError::UnknownNode(n));
                }
            }
        }
        Ok(())
    }
}

/// Shape check shared by the wall builder and the writer.
pub(crate) fn check_element(cell: usize, element: &[NodeId]) -> Result<CellType, MeshOrderError> {
    let ty = CellType::from_vertex_count(element.len()).ok_or(
        MeshOrderError::UnsupportedTopology {
            cell,
            vertices: element.len(),
        },
    )?;
    for (i, a) in element.iter().enumerate() {
        if element[i + 1..].contains(a) {
            return Err(MeshOrderError::DegenerateElement { cell });
        }
    }
    Ok(ty)
}
