mod util;
use util::*;

use mesh_ordering::mesh_error::MeshOrderError;
use mesh_ordering::topology::walls::{
    MeshTopology, NeighborPair, WallCounts, boundary_node_set, boundary_walls, build_neighbors,
    build_walls, classify_walls, element_sides,
};

#[test]
fn two_by_one_quad_scenario() {
    let elements = elems(&[&[1, 2, 5, 6], &[2, 3, 4, 5]]);

    let walls = build_walls(&elements).unwrap();
    assert_eq!(walls.len(), 8);

    let counts = classify_walls(&walls).unwrap();
    assert_eq!(
        counts,
        WallCounts {
            interior: 1,
            boundary: 6
        }
    );

    let nb = build_neighbors(&elements).unwrap();
    assert_eq!(
        nb,
        vec![NeighborPair {
            c1: 0,
            c2: 1,
            iw1: 1,
            iw2: 3,
            n1: nid(2),
            n2: nid(5),
        }]
    );

    let boundary = boundary_walls(&walls).unwrap();
    assert_eq!(boundary.len(), 6);
    assert!(boundary.iter().all(|w| w.key != nb[0].key()));
}

#[test]
fn every_pair_names_a_side_of_both_cells() {
    let mesh = tri_grid(5, 4);
    let nb = build_neighbors(&mesh.elements).unwrap();
    for p in &nb {
        assert!(p.n1 < p.n2);
        assert!(p.c1 < p.c2);
        let key = p.key();
        let side1: Vec<_> = element_sides(&mesh.elements[p.c1]).collect();
        let side2: Vec<_> = element_sides(&mesh.elements[p.c2]).collect();
        assert_eq!(side1[p.iw1], key);
        assert_eq!(side2[p.iw2], key);
    }
}

#[test]
fn structured_grid_counts() {
    let (nx, ny) = (6, 3);
    let mesh = quad_grid(nx, ny);
    let topo = MeshTopology::build(&mesh.elements).unwrap();
    assert_eq!(topo.wall_count, 4 * nx * ny);
    assert_eq!(topo.counts.interior, (nx - 1) * ny + nx * (ny - 1));
    assert_eq!(topo.counts.boundary, 2 * (nx + ny));
    assert_eq!(topo.neighbors.len(), topo.counts.interior);
    assert_eq!(topo.boundary_nodes.len(), 2 * (nx + ny));
    assert_eq!(
        topo.boundary_nodes,
        boundary_node_set(&mesh.elements).unwrap()
    );
}

#[test]
fn neighbors_sorted_by_cell_pair() {
    let mesh = tri_grid(4, 4);
    let nb = build_neighbors(&mesh.elements).unwrap();
    let keys: Vec<_> = nb.iter().map(|p| (p.c1, p.c2)).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn neighbor_discovery_is_deterministic() {
    let mesh = tri_grid(7, 5);
    let a = build_neighbors(&mesh.elements).unwrap();
    let b = build_neighbors(&mesh.elements).unwrap();
    assert_eq!(a, b);
}

#[test]
fn mixed_mesh_pairs_triangle_with_quad() {
    // quad 1-2-5-4 next to triangles 2-3-6 and 2-6-5
    let elements = elems(&[&[1, 2, 5, 4], &[2, 3, 6], &[2, 6, 5]]);
    let nb = build_neighbors(&elements).unwrap();
    let pairs: Vec<_> = nb.iter().map(|p| (p.c1, p.c2, p.n1.get(), p.n2.get())).collect();
    assert_eq!(pairs, vec![(0, 2, 2, 5), (1, 2, 2, 6)]);
}

#[test]
fn non_manifold_fan_is_topology_error() {
    let elements = elems(&[&[1, 2, 3], &[1, 2, 4], &[2, 1, 5]]);
    let walls = build_walls(&elements).unwrap();
    assert!(matches!(
        classify_walls(&walls),
        Err(MeshOrderError::NonManifoldWall { owners: 3, .. })
    ));
    assert!(matches!(
        MeshTopology::build(&elements),
        Err(MeshOrderError::NonManifoldWall { .. })
    ));
}

#[test]
fn unsupported_and_degenerate_elements_fail() {
    assert!(matches!(
        build_neighbors(&elems(&[&[1, 2, 3, 4, 5]])),
        Err(MeshOrderError::UnsupportedTopology { cell: 0, vertices: 5 })
    ));
    assert!(matches!(
        build_neighbors(&elems(&[&[1, 2, 3], &[4, 4, 5]])),
        Err(MeshOrderError::DegenerateElement { cell: 1 })
    ));
}
