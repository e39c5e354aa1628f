#![allow(dead_code)]
use mesh_ordering::topology::mesh::{Element, Mesh2d};
use mesh_ordering::topology::point::NodeId;
use std::path::PathBuf;

pub fn nid(u: u64) -> NodeId {
    NodeId::new(u).unwrap()
}

pub fn elems(raw: &[&[u64]]) -> Vec<Element> {
    raw.iter().map(|e| e.iter().map(|&i| nid(i)).collect()).collect()
}

/// Node id of grid vertex `(i, j)` in an `nx`-cell-wide structured grid.
pub fn grid_node(nx: usize, i: usize, j: usize) -> NodeId {
    nid((j * (nx + 1) + i + 1) as u64)
}

/// `nx * ny` unit quads, row-major, counter-clockwise vertices.
pub fn quad_grid(nx: usize, ny: usize) -> Mesh2d {
    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            nodes.push([i as f64, j as f64]);
        }
    }
    let mut elements = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            elements.push(vec![
                grid_node(nx, i, j),
                grid_node(nx, i + 1, j),
                grid_node(nx, i + 1, j + 1),
                grid_node(nx, i, j + 1),
            ]);
        }
    }
    Mesh2d::new(nodes, elements)
}

/// Same vertices as [`quad_grid`], each quad split into two triangles.
pub fn tri_grid(nx: usize, ny: usize) -> Mesh2d {
    let quads = quad_grid(nx, ny);
    let elements = quads
        .elements
        .iter()
        .flat_map(|q| [vec![q[0], q[1], q[2]], vec![q[0], q[2], q[3]]])
        .collect();
    Mesh2d::new(quads.nodes, elements)
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

/// Bandwidth of a neighbor list in its own cell numbering.
pub fn neighbor_bandwidth(pairs: &[mesh_ordering::topology::walls::NeighborPair]) -> usize {
    pairs.iter().map(|p| p.c1.abs_diff(p.c2)).max().unwrap_or(0)
}

/// Fresh per-test scratch directory under the system temp dir.
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mesh-ordering-{}-{}",
        test,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
