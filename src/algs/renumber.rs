//! Cell renumbering: apply an RCM permutation to the element list.
//!
//! Only the order of cells changes; node ids inside elements are left
//! untouched. Neighbor pairs carry node ids and local wall indices next to
//! the cell indices, so they are never pushed through the cell permutation:
//! the neighbor list is always rebuilt from the reordered elements.

use crate::algs::adjacency_graph::CellGraph;
use crate::algs::rcm::{CellPermutation, reduce_bandwidth};
use crate::mesh_error::MeshOrderError;
use crate::topology::mesh::Element;
use crate::topology::walls::{NeighborPair, build_neighbors};

/// Result of reordering a mesh's cells.
#[derive(Debug, Clone)]
pub struct CellReordering {
    /// Elements in their new order.
    pub elements: Vec<Element>,
    /// Neighbor pairs recomputed from `elements`.
    pub neighbors: Vec<NeighborPair>,
    /// Permutation that produced `elements`.
    pub permutation: CellPermutation,
    pub bandwidth_before: usize,
    pub bandwidth_after: usize,
}

/// `reordered[i] = elements[perm[i]]`.
pub fn apply_permutation(
    elements: &[Element],
    permutation: &CellPermutation,
) -> Result<Vec<Element>, MeshOrderError> {
    permutation.apply(elements)
}

/// Compute the RCM permutation for `elements` from its current neighbor
/// list, apply it, and rebuild the neighbor list.
///
/// The bandwidth never grows, and reordering an already reordered mesh
/// leaves it unchanged (see [`reduce_bandwidth`]).
pub fn reorder_cells(
    elements: &[Element],
    neighbors: &[NeighborPair],
) -> Result<CellReordering, MeshOrderError> {
    let graph = CellGraph::from_neighbors(neighbors, elements.len())?;
    let permutation = reduce_bandwidth(&graph);
    let bandwidth_before = graph.bandwidth();
    let bandwidth_after = graph.bandwidth_under(permutation.inverse());
    log::info!("RCM reordering applied: bandwidth {bandwidth_before} -> {bandwidth_after}");

    let reordered = apply_permutation(elements, &permutation)?;
    let neighbors = build_neighbors(&reordered)?;
    log::info!("reordered calculation walls created: {} walls", neighbors.len());

    Ok(CellReordering {
        elements: reordered,
        neighbors,
        permutation,
        bandwidth_before,
        bandwidth_after,
    })
}
