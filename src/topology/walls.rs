//! Wall (face) derivation and cell adjacency for 2D meshes.
//!
//! Every element contributes one [`Wall`] per side. Sorting all walls by
//! their canonical node pair puts the two owners of an interior wall next to
//! each other, so neighbor discovery is a single scan over a sorted list
//! (`O(E log E)` for `E` walls) instead of pairwise element comparison.
//!
//! Determinism:
//! - Walls are sorted with a stable sort, so owners of a shared wall always
//!   appear in ascending cell order.
//! - Neighbor pairs are returned sorted by `(c1, c2)`; no hash iteration order
//!   leaks into any output.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshOrderError;
use crate::topology::mesh::{Element, check_element};
use crate::topology::point::NodeId;

/// Orientation-independent node pair with `id1 < id2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallKey {
    pub id1: NodeId,
    pub id2: NodeId,
}

impl WallKey {
    /// Canonical key for the side `a`–`b`, regardless of orientation.
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a < b {
            Self { id1: a, id2: b }
        } else {
            Self { id1: b, id2: a }
        }
    }

    /// The endpoint opposite `n`, if `n` is one of the two.
    #[inline]
    pub fn other(&self, n: NodeId) -> Option<NodeId> {
        if n == self.id1 {
            Some(self.id2)
        } else if n == self.id2 {
            Some(self.id1)
        } else {
            None
        }
    }
}

/// One side of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wall {
    pub key: WallKey,
    /// Owning cell index.
    pub cell: usize,
    /// Position of the side's first node within the owning element.
    pub local: usize,
}

/// Interior "calculation wall" shared by cells `c1` and `c2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeighborPair {
    pub c1: usize,
    pub c2: usize,
    pub iw1: usize,
    pub iw2: usize,
    pub n1: NodeId,
    pub n2: NodeId,
}

impl NeighborPair {
    #[inline]
    pub fn key(&self) -> WallKey {
        WallKey {
            id1: self.n1,
            id2: self.n2,
        }
    }
}

/// Interior and boundary wall counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallCounts {
    pub interior: usize,
    pub boundary: usize,
}

/// Canonical keys of the sides of one element, in local order.
pub fn element_sides(element: &[NodeId]) -> impl Iterator<Item = WallKey> + '_ {
    let n = element.len();
    (0..n).map(move |j| WallKey::new(element[j], element[(j + 1) % n]))
}

/// Emit one wall per side of every element.
///
/// The result holds exactly `Σ vertex_count` walls; interior walls appear
/// twice, once per owner.
pub fn build_walls(elements: &[Element]) -> Result<Vec<Wall>, MeshOrderError> {
    let total: usize = elements.iter().map(Vec::len).sum();
    let mut walls = Vec::with_capacity(total);
    for (cell, element) in elements.iter().enumerate() {
        check_element(cell, element)?;
        for (local, key) in element_sides(element).enumerate() {
            walls.push(Wall { key, cell, local });
        }
    }
    Ok(walls)
}

/// Stable sort by canonical key, then split into runs of equal keys.
fn sorted_runs(mut walls: Vec<Wall>) -> Result<Vec<Wall>, MeshOrderError> {
    walls.sort_by_key(|w| w.key);
    for run in walls.chunk_by(|a, b| a.key == b.key) {
        if run.len() > 2 {
            let key = run[0].key;
            log::error!(
                "non-manifold wall ({}, {}) owned by {} cells",
                key.id1,
                key.id2,
                run.len()
            );
            return Err(MeshOrderError::NonManifoldWall {
                id1: key.id1,
                id2: key.id2,
                owners: run.len(),
            });
        }
    }
    Ok(walls)
}

/// Count interior (two owners) and boundary (one owner) walls.
///
/// # Errors
/// [`MeshOrderError::NonManifoldWall`] if a wall has three or more owners.
pub fn classify_walls(walls: &[Wall]) -> Result<WallCounts, MeshOrderError> {
    let sorted = sorted_runs(walls.to_vec())?;
    let mut counts = WallCounts::default();
    for run in sorted.chunk_by(|a, b| a.key == b.key) {
        match run.len() {
            1 => counts.boundary += 1,
            _ => counts.interior += 1,
        }
    }
    Ok(counts)
}

/// Walls owned by exactly one cell, sorted by key.
pub fn boundary_walls(walls: &[Wall]) -> Result<Vec<Wall>, MeshOrderError> {
    let sorted = sorted_runs(walls.to_vec())?;
    Ok(sorted
        .chunk_by(|a, b| a.key == b.key)
        .filter(|run| run.len() == 1)
        .map(|run| run[0])
        .collect())
}

/// Node ids lying on at least one boundary wall.
pub fn boundary_node_set(elements: &[Element]) -> Result<BTreeSet<NodeId>, MeshOrderError> {
    let walls = build_walls(elements)?;
    let mut nodes = BTreeSet::new();
    for w in boundary_walls(&walls)? {
        nodes.insert(w.key.id1);
        nodes.insert(w.key.id2);
    }
    Ok(nodes)
}

/// Pair up the owners of every interior wall.
///
/// `c1` is always the lower cell index of the two owners; `iw1`/`iw2` are the
/// matching local wall indices. Output is sorted by `(c1, c2)`.
pub fn build_neighbors(elements: &[Element]) -> Result<Vec<NeighborPair>, MeshOrderError> {
    let walls = sorted_runs(build_walls(elements)?)?;
    Ok(neighbors_from_sorted(&walls))
}

fn neighbors_from_sorted(walls: &[Wall]) -> Vec<NeighborPair> {
    let mut neighbors: Vec<NeighborPair> = walls
        .chunk_by(|a, b| a.key == b.key)
        .filter_map(|run| match run {
            [w1, w2] => Some(NeighborPair {
                c1: w1.cell,
                c2: w2.cell,
                iw1: w1.local,
                iw2: w2.local,
                n1: w1.key.id1,
                n2: w1.key.id2,
            }),
            _ => None,
        })
        .collect();
    neighbors.sort_by_key(|p| (p.c1, p.c2));
    neighbors
}

/// Walls, counts and neighbor pairs of one element list.
#[derive(Clone, Debug, Default)]
pub struct MeshTopology {
    pub wall_count: usize,
    pub counts: WallCounts,
    pub neighbors: Vec<NeighborPair>,
    pub boundary_nodes: BTreeSet<NodeId>,
}

impl MeshTopology {
    /// Derive all wall-level structures in one sort.
    pub fn build(elements: &[Element]) -> Result<Self, MeshOrderError> {
        let walls = sorted_runs(build_walls(elements)?)?;
        let wall_count = walls.len();
        log::info!("wall list created: {wall_count} walls");

        let mut counts = WallCounts::default();
        let mut boundary_nodes = BTreeSet::new();
        for run in walls.chunk_by(|a, b| a.key == b.key) {
            if run.len() == 1 {
                counts.boundary += 1;
                boundary_nodes.insert(run[0].key.id1);
                boundary_nodes.insert(run[0].key.id2);
            } else {
                counts.interior += 1;
            }
        }
        log::info!(
            "calculation walls: {}, boundary walls: {}",
            counts.interior,
            counts.boundary
        );

        let neighbors = neighbors_from_sorted(&walls);
        log::info!("neighbor cell list created: {} pairs", neighbors.len());

        Ok(Self {
            wall_count,
            counts,
            neighbors,
            boundary_nodes,
        })
    }
}
