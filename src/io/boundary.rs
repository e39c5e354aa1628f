//! Boundary-zone node block: a count line, then one indented node id per line.

use crate::mesh_error::MeshOrderError;
use crate::topology::point::NodeId;
use std::io::Write;

/// Indentation of node id lines.
pub const NODE_INDENT: &str = "    ";

/// Write the ordered node sequence of one boundary zone.
pub fn write_node_sequence<W: Write>(mut writer: W, nodes: &[NodeId]) -> Result<(), MeshOrderError> {
    writeln!(writer, "{}", nodes.len())?;
    for n in nodes {
        writeln!(writer, "{NODE_INDENT}{n}")?;
    }
    Ok(())
}
