//! Boundary node ordering for open-boundary zones.
//!
//! A boundary-condition zone is a polygon drawn over part of the mesh
//! perimeter. Its node sequence is derived in four steps:
//! 1. [`cells_in_region`]: cells whose centroid lies in the polygon;
//! 2. [`boundary_edges_from_cells`]: sides owned by exactly one selected cell
//!    whose endpoints are both global boundary nodes;
//! 3. [`filter_edges_by_region`]: sides with both endpoints in the polygon;
//! 4. [`order_nodes`]: walk the resulting chain from one end to the other.

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashMap;

use crate::geometry::polygon::Region;
use crate::mesh_error::MeshOrderError;
use crate::topology::mesh::Mesh2d;
use crate::topology::point::NodeId;
use crate::topology::walls::{WallKey, element_sides};

/// Indices of the cells whose centroid is inside `region`.
pub fn cells_in_region<R: Region + ?Sized>(
    mesh: &Mesh2d,
    region: &R,
) -> Result<Vec<usize>, MeshOrderError> {
    let bbox = region.bounding_box();
    let mut cells = Vec::new();
    for cell in 0..mesh.cell_count() {
        let c = mesh.centroid(cell)?;
        if bbox.contains(c) && region.contains(c) {
            cells.push(cell);
        }
    }
    Ok(cells)
}

/// Sides that bound the selected cell set and lie on the mesh boundary.
///
/// A side qualifies when exactly one selected cell owns it and both of its
/// endpoints are in `boundary_nodes`; the second test drops sides that only
/// separate selected from unselected cells. Output is sorted.
pub fn boundary_edges_from_cells<'a>(
    cells: impl IntoIterator<Item = &'a [NodeId]>,
    boundary_nodes: &BTreeSet<NodeId>,
) -> Vec<WallKey> {
    let mut multiplicity: HashMap<WallKey, usize> = HashMap::new();
    for element in cells {
        for key in element_sides(element) {
            *multiplicity.entry(key).or_insert(0) += 1;
        }
    }
    let mut edges: Vec<WallKey> = multiplicity
        .into_iter()
        .filter(|&(key, count)| {
            count == 1 && boundary_nodes.contains(&key.id1) && boundary_nodes.contains(&key.id2)
        })
        .map(|(key, _)| key)
        .collect();
    edges.sort_unstable();
    edges
}

/// Keep the edges whose two endpoints are inside `region` (outline included).
pub fn filter_edges_by_region<R: Region + ?Sized>(
    edges: &[WallKey],
    mesh: &Mesh2d,
    region: &R,
) -> Result<Vec<WallKey>, MeshOrderError> {
    let mut out = Vec::with_capacity(edges.len());
    for &e in edges {
        if region.contains(mesh.coord(e.id1)?) && region.contains(mesh.coord(e.id2)?) {
            out.push(e);
        }
    }
    Ok(out)
}

/// Order the nodes of a simple chain of edges into one directed sequence.
///
/// The walk starts at the smallest node of degree 1 and stops at the other
/// endpoint. A closed loop (no degree-1 node) is accepted with a warning:
/// it starts at its smallest node, heads toward that node's smaller neighbor
/// and stops before returning to the start.
///
/// # Errors
/// [`MeshOrderError::BoundaryPath`] when a node has degree > 2, when the
/// edges form more than one chain, or when the walk does not terminate
/// within `edges.len()` steps.
pub fn order_nodes(edges: &[WallKey]) -> Result<Vec<NodeId>, MeshOrderError> {
    let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for e in edges {
        adjacency.entry(e.id1).or_default().push(e.id2);
        adjacency.entry(e.id2).or_default().push(e.id1);
    }
    for (node, nbrs) in adjacency.iter_mut() {
        nbrs.sort_unstable();
        nbrs.dedup();
        if nbrs.len() > 2 {
            log::error!("boundary node {node} has {} boundary neighbors", nbrs.len());
            return Err(MeshOrderError::BoundaryPath(format!(
                "node {node} has degree {} in the boundary edge set",
                nbrs.len()
            )));
        }
    }

    let start = match adjacency.iter().find(|(_, nbrs)| nbrs.len() == 1) {
        Some((&node, _)) => node,
        None => match adjacency.keys().next() {
            Some(&node) => {
                log::warn!("boundary edges form a closed loop; starting at node {node}");
                node
            }
            None => return Ok(Vec::new()),
        },
    };

    let mut sequence = vec![start];
    let mut visited = BTreeSet::from([start]);
    let mut prev: Option<NodeId> = None;
    let mut curr = start;
    let mut steps = 0usize;
    loop {
        let next = adjacency[&curr].iter().copied().find(|&n| Some(n) != prev);
        let Some(next) = next else { break };
        if next == start {
            break;
        }
        steps += 1;
        if steps > edges.len() || !visited.insert(next) {
            return Err(MeshOrderError::BoundaryPath(format!(
                "walk revisits node {next} after {steps} steps"
            )));
        }
        sequence.push(next);
        if adjacency[&next].len() == 1 {
            break;
        }
        prev = Some(curr);
        curr = next;
    }

    if sequence.len() != adjacency.len() {
        log::error!(
            "boundary walk reached {} of {} nodes",
            sequence.len(),
            adjacency.len()
        );
        return Err(MeshOrderError::BoundaryPath(format!(
            "boundary edges are not a single chain: walk reached {} of {} nodes",
            sequence.len(),
            adjacency.len()
        )));
    }
    Ok(sequence)
}

/// Ordered boundary nodes of the zone delimited by `region`.
pub fn order_zone_nodes<R: Region + ?Sized>(
    mesh: &Mesh2d,
    boundary_nodes: &BTreeSet<NodeId>,
    region: &R,
) -> Result<Vec<NodeId>, MeshOrderError> {
    let cells = cells_in_region(mesh, region)?;
    if cells.is_empty() {
        log::warn!("zone polygon contains no cell centroids");
    }
    let edges = boundary_edges_from_cells(
        cells.iter().map(|&c| mesh.elements[c].as_slice()),
        boundary_nodes,
    );
    let edges = filter_edges_by_region(&edges, mesh, region)?;
    if edges.is_empty() {
        return Err(MeshOrderError::BoundaryPath(
            "zone polygon selects no boundary edges".into(),
        ));
    }
    let nodes = order_nodes(&edges)?;
    log::info!(
        "zone boundary ordered: {} edges, {} nodes",
        edges.len(),
        nodes.len()
    );
    Ok(nodes)
}
