use mesh_ordering::io::MeshReader;
use mesh_ordering::io::gmsh::GmshReader;
use mesh_ordering::mesh_error::MeshOrderError;

const NODES: &str = "$Nodes
3
1 0 0 0
2 1 0 0
3 0 1 0
$EndNodes
";

fn read(text: &str) -> Result<mesh_ordering::topology::mesh::Mesh2d, MeshOrderError> {
    GmshReader.read(text.as_bytes())
}

fn assert_format_err(text: &str) {
    match read(text) {
        Err(MeshOrderError::Format(_)) => {}
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn minimal_triangle_without_mesh_format_is_accepted() {
    let text = format!("{NODES}$Elements\n1\n1 2 2 0 1 1 2 3\n$EndElements\n");
    let mesh = read(&text).unwrap();
    assert_eq!(mesh.cell_count(), 1);
}

#[test]
fn missing_sections_are_rejected() {
    assert_format_err(NODES);
    assert_format_err("$Elements\n1\n1 2 2 0 1 1 2 3\n$EndElements\n");
    assert_format_err("");
}

#[test]
fn declared_counts_are_enforced() {
    // fewer records than declared
    assert_format_err(&format!("{NODES}$Elements\n2\n1 2 2 0 1 1 2 3\n$EndElements\n"));
    // more records than declared
    assert_format_err(&format!(
        "{NODES}$Elements\n1\n1 2 2 0 1 1 2 3\n2 2 2 0 1 1 3 2\n$EndElements\n"
    ));
    // truncated file
    assert_format_err(&format!("{NODES}$Elements\n2\n1 2 2 0 1 1 2 3\n"));
    // node block shorter than declared
    assert_format_err("$Nodes\n4\n1 0 0 0\n$EndNodes\n$Elements\n0\n$EndElements\n");
}

#[test]
fn node_ids_must_be_dense() {
    let text = "$Nodes\n3\n1 0 0 0\n2 1 0 0\n4 0 1 0\n$EndNodes\n$Elements\n0\n$EndElements\n";
    assert_format_err(text);
}

#[test]
fn node_ids_may_be_listed_out_of_order() {
    let text = "$Nodes\n3\n3 0 1 0\n1 0 0 0\n2 1 0 0\n$EndNodes\n$Elements\n1\n1 2 0 1 2 3\n$EndElements\n";
    let mesh = read(text).unwrap();
    assert_eq!(mesh.nodes, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
}

#[test]
fn unknown_node_reference_is_rejected() {
    assert_format_err(&format!("{NODES}$Elements\n1\n1 2 2 0 1 1 2 7\n$EndElements\n"));
}

#[test]
fn wrong_vertex_count_for_type_is_rejected() {
    assert_format_err(&format!("{NODES}$Elements\n1\n1 3 2 0 1 1 2 3\n$EndElements\n"));
}

#[test]
fn tag_count_controls_node_offset() {
    // four tags, then the connectivity
    let text = format!("{NODES}$Elements\n1\n1 2 4 9 9 9 9 3 2 1\n$EndElements\n");
    let mesh = read(&text).unwrap();
    let ids: Vec<u64> = mesh.elements[0].iter().map(|n| n.get()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn binary_and_v4_files_are_rejected() {
    assert_format_err(&format!("$MeshFormat\n2.2 1 8\n$EndMeshFormat\n{NODES}"));
    assert_format_err(&format!(
        "$MeshFormat\n4.1 0 8\n$EndMeshFormat\n{NODES}$Elements\n0\n$EndElements\n"
    ));
}
