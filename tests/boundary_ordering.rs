mod util;
use util::*;

use mesh_ordering::algs::boundary::{
    boundary_edges_from_cells, cells_in_region, filter_edges_by_region, order_nodes,
    order_zone_nodes,
};
use mesh_ordering::geometry::polygon::Polygon;
use mesh_ordering::io::boundary::write_node_sequence;
use mesh_ordering::mesh_error::MeshOrderError;
use mesh_ordering::topology::mesh::Mesh2d;
use mesh_ordering::topology::walls::{MeshTopology, WallKey};

fn two_quads() -> Mesh2d {
    Mesh2d::new(
        vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ],
        elems(&[&[1, 2, 5, 6], &[2, 3, 4, 5]]),
    )
}

#[test]
fn outer_loop_of_two_quads_covers_all_six_nodes() {
    let mesh = two_quads();
    let topo = MeshTopology::build(&mesh.elements).unwrap();
    let everything = Polygon::rectangle([-1.0, -1.0], [3.0, 2.0]).unwrap();
    let seq = order_zone_nodes(&mesh, &topo.boundary_nodes, &everything).unwrap();
    assert_eq!(seq.len(), 6);
    let want: Vec<_> = (1..=6).map(nid).collect();
    assert_permutation(&seq, &want);
    // closed loop: smallest node first, toward its smaller neighbor
    assert_eq!(seq, want);
}

#[test]
fn corner_zone_on_grid_is_a_consecutive_chain() {
    let (nx, ny) = (4, 3);
    let mesh = quad_grid(nx, ny);
    let topo = MeshTopology::build(&mesh.elements).unwrap();
    let zone = Polygon::rectangle([-0.5, -0.5], [2.2, 1.2]).unwrap();

    let cells = cells_in_region(&mesh, &zone).unwrap();
    assert_eq!(cells, vec![0, 1]);

    let edges = boundary_edges_from_cells(
        cells.iter().map(|&c| mesh.elements[c].as_slice()),
        &topo.boundary_nodes,
    );
    let edges = filter_edges_by_region(&edges, &mesh, &zone).unwrap();
    assert_eq!(edges.len(), 3);

    let seq = order_nodes(&edges).unwrap();
    assert_eq!(
        seq,
        vec![
            grid_node(nx, 2, 0),
            grid_node(nx, 1, 0),
            grid_node(nx, 0, 0),
            grid_node(nx, 0, 1),
        ]
    );
    for w in seq.windows(2) {
        assert!(edges.contains(&WallKey::new(w[0], w[1])));
    }
    for n in &seq {
        assert!(topo.boundary_nodes.contains(n));
    }
}

#[test]
fn zone_edges_outside_the_polygon_are_filtered() {
    // the polygon takes the bottom-left cell's centroid but stops short of
    // node (1, 0), so the bottom side of that cell is dropped
    let mesh = quad_grid(3, 3);
    let topo = MeshTopology::build(&mesh.elements).unwrap();
    let zone = Polygon::new(vec![[-0.5, -0.5], [0.8, -0.5], [0.8, 1.2], [-0.5, 1.2]]).unwrap();
    let seq = order_zone_nodes(&mesh, &topo.boundary_nodes, &zone).unwrap();
    assert_eq!(seq, vec![grid_node(3, 0, 0), grid_node(3, 0, 1)]);
}

#[test]
fn zone_without_boundary_edges_is_an_error() {
    let mesh = quad_grid(3, 3);
    let topo = MeshTopology::build(&mesh.elements).unwrap();
    // only the middle cell: none of its sides lie on the perimeter
    let zone = Polygon::rectangle([1.2, 1.2], [1.8, 1.8]).unwrap();
    assert!(matches!(
        order_zone_nodes(&mesh, &topo.boundary_nodes, &zone),
        Err(MeshOrderError::BoundaryPath(_))
    ));
}

#[test]
fn ordered_zone_is_written_as_indented_block() {
    let mesh = quad_grid(4, 3);
    let topo = MeshTopology::build(&mesh.elements).unwrap();
    let zone = Polygon::rectangle([-0.5, -0.5], [2.2, 1.2]).unwrap();
    let seq = order_zone_nodes(&mesh, &topo.boundary_nodes, &zone).unwrap();
    let mut out = Vec::new();
    write_node_sequence(&mut out, &seq).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "4\n    3\n    2\n    1\n    6\n");
}
