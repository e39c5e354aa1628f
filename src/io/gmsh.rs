//! Gmsh `.msh` reader and writer for 2D finite-volume meshes.
//!
//! # Supported format
//! - ASCII `.msh` version **2.x** (the `-format msh2` output of Gmsh).
//! - Element types 2 (triangle) and 3 (quad). Every other element type
//!   (points, lines, 3D solids, higher order) is skipped on read.
//!
//! # Limitations
//! - Binary files are not supported.
//! - Node ids must be the dense range `1..=N`; z coordinates are dropped.
//! - Element tags are skipped; the writer emits two zero tags.

use crate::io::{MeshReader, MeshWriter};
use crate::mesh_error::MeshOrderError;
use crate::topology::cell_type::CellType;
use crate::topology::mesh::{Element, Mesh2d};
use crate::topology::point::NodeId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::str::{Lines, SplitWhitespace};

/// Gmsh `.msh` reader for ASCII v2 meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshReader;

/// Formatting knobs for [`GmshWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmshWriteOptions {
    /// Decimal places written for node coordinates.
    pub precision: usize,
    /// First element tag (physical group).
    pub physical_tag: i64,
    /// Second element tag (elementary entity).
    pub geometry_tag: i64,
}

impl Default for GmshWriteOptions {
    fn default() -> Self {
        Self {
            precision: 6,
            physical_tag: 0,
            geometry_tag: 0,
        }
    }
}

/// Gmsh `.msh` v2.2 ASCII writer.
#[derive(Debug, Default, Clone)]
pub struct GmshWriter {
    pub options: GmshWriteOptions,
}

impl GmshWriter {
    pub fn with_options(options: GmshWriteOptions) -> Self {
        Self { options }
    }
}

fn parse_err(msg: impl Into<String>) -> MeshOrderError {
    MeshOrderError::Format(msg.into())
}

impl GmshReader {
    fn parse_version(line: &str) -> Result<(), MeshOrderError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| parse_err("missing mesh format version"))?;
        let file_type = parts
            .next()
            .ok_or_else(|| parse_err("missing mesh format type"))?;
        if file_type != "0" {
            return Err(parse_err("binary .msh files are not supported"));
        }
        if !version.starts_with("2.") {
            return Err(parse_err(format!("unsupported gmsh version: {version}")));
        }
        Ok(())
    }

    fn parse_count(lines: &mut Lines<'_>, what: &str) -> Result<usize, MeshOrderError> {
        let line = lines
            .next()
            .ok_or_else(|| parse_err(format!("missing {what} count")))?;
        line.trim()
            .parse::<usize>()
            .map_err(|_| parse_err(format!("invalid {what} count: {line}")))
    }

    fn next_field<'a>(
        parts: &mut SplitWhitespace<'a>,
        what: &str,
    ) -> Result<&'a str, MeshOrderError> {
        parts.next().ok_or_else(|| parse_err(format!("missing {what}")))
    }

    fn parse_node_id(raw: &str) -> Result<NodeId, MeshOrderError> {
        let raw = raw
            .parse::<u64>()
            .map_err(|_| parse_err(format!("invalid node id: {raw}")))?;
        NodeId::new(raw).map_err(|_| parse_err("node id 0 is not allowed"))
    }

    fn parse_coord(raw: &str) -> Result<f64, MeshOrderError> {
        raw.parse::<f64>()
            .map_err(|_| parse_err(format!("invalid coordinate: {raw}")))
    }

    /// Next record line of a section, or a count-mismatch error if the end
    /// marker shows up first.
    fn record<'a>(
        lines: &mut Lines<'a>,
        end_marker: &str,
        declared: usize,
        found: usize,
    ) -> Result<&'a str, MeshOrderError> {
        match lines.next() {
            Some(line) if line.trim() == end_marker => Err(parse_err(format!(
                "declared {declared} records before {end_marker}, found {found}"
            ))),
            Some(line) => Ok(line),
            None => Err(parse_err(format!("unexpected end of file before {end_marker}"))),
        }
    }

    fn expect_end(lines: &mut Lines<'_>, end_marker: &str, declared: usize) -> Result<(), MeshOrderError> {
        match lines.next() {
            Some(line) if line.trim() == end_marker => Ok(()),
            Some(_) => Err(parse_err(format!(
                "more than the declared {declared} records before {end_marker}"
            ))),
            None => Err(parse_err(format!("missing {end_marker}"))),
        }
    }

    fn read_nodes(lines: &mut Lines<'_>) -> Result<Vec<[f64; 2]>, MeshOrderError> {
        let count = Self::parse_count(lines, "node")?;
        let mut nodes: Vec<(NodeId, [f64; 2])> = Vec::with_capacity(count);
        for found in 0..count {
            let line = Self::record(lines, "$EndNodes", count, found)?;
            let mut parts = line.split_whitespace();
            let id = Self::parse_node_id(Self::next_field(&mut parts, "node id")?)?;
            let x = Self::parse_coord(Self::next_field(&mut parts, "x coordinate")?)?;
            let y = Self::parse_coord(Self::next_field(&mut parts, "y coordinate")?)?;
            nodes.push((id, [x, y]));
        }
        Self::expect_end(lines, "$EndNodes", count)?;

        nodes.sort_unstable_by_key(|&(id, _)| id);
        for (pos, &(id, _)) in nodes.iter().enumerate() {
            if id.index() != pos {
                return Err(parse_err(format!(
                    "node ids must be contiguous 1..={count}; found {id} at position {}",
                    pos + 1
                )));
            }
        }
        Ok(nodes.into_iter().map(|(_, xy)| xy).collect())
    }

    fn read_elements(lines: &mut Lines<'_>) -> Result<Vec<Element>, MeshOrderError> {
        let count = Self::parse_count(lines, "element")?;
        let mut elements = Vec::with_capacity(count);
        let mut skipped = 0usize;
        for found in 0..count {
            let line = Self::record(lines, "$EndElements", count, found)?;
            let mut parts = line.split_whitespace();
            let elem_id = Self::next_field(&mut parts, "element id")?;
            let elem_type = Self::next_field(&mut parts, "element type")?
                .parse::<u32>()
                .map_err(|_| parse_err(format!("invalid type for element {elem_id}")))?;
            let num_tags = Self::next_field(&mut parts, "element tag count")?
                .parse::<usize>()
                .map_err(|_| parse_err(format!("invalid tag count for element {elem_id}")))?;
            let Some(cell_type) = CellType::from_gmsh_code(elem_type) else {
                skipped += 1;
                continue;
            };
            for _ in 0..num_tags {
                Self::next_field(&mut parts, "element tag")?;
            }
            let conn = parts
                .map(Self::parse_node_id)
                .collect::<Result<Element, _>>()?;
            if conn.len() != cell_type.vertex_count() {
                return Err(parse_err(format!(
                    "element {elem_id} of type {elem_type} lists {} nodes, expected {}",
                    conn.len(),
                    cell_type.vertex_count()
                )));
            }
            elements.push(conn);
        }
        Self::expect_end(lines, "$EndElements", count)?;
        if skipped > 0 {
            log::warn!("skipped {skipped} non-surface elements (points, lines or solids)");
        }
        Ok(elements)
    }
}

impl MeshReader for GmshReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<Mesh2d, MeshOrderError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        // Gmsh writes latin-1 comments into some sections
        let contents = String::from_utf8_lossy(&raw);
        let mut lines = contents.lines();

        let mut nodes: Option<Vec<[f64; 2]>> = None;
        let mut elements: Option<Vec<Element>> = None;

        while let Some(line) = lines.next() {
            match line.trim() {
                "$MeshFormat" => {
                    let format_line = lines
                        .next()
                        .ok_or_else(|| parse_err("missing MeshFormat"))?;
                    Self::parse_version(format_line)?;
                    let end = lines
                        .next()
                        .ok_or_else(|| parse_err("missing $EndMeshFormat"))?;
                    if end.trim() != "$EndMeshFormat" {
                        return Err(parse_err("missing $EndMeshFormat"));
                    }
                }
                "$Nodes" => nodes = Some(Self::read_nodes(&mut lines)?),
                "$Elements" => elements = Some(Self::read_elements(&mut lines)?),
                _ => {
                    // other sections are not needed
                }
            }
        }

        let nodes = nodes.ok_or_else(|| parse_err("missing $Nodes section"))?;
        let elements = elements.ok_or_else(|| parse_err("missing $Elements section"))?;
        for (cell, element) in elements.iter().enumerate() {
            if let Some(&n) = element.iter().find(|n| n.index() >= nodes.len()) {
                return Err(parse_err(format!(
                    "element {} references unknown node {n}",
                    cell + 1
                )));
            }
        }
        Ok(Mesh2d { nodes, elements })
    }
}

impl MeshWriter for GmshWriter {
    fn write<W: Write>(&self, mut writer: W, mesh: &Mesh2d) -> Result<(), MeshOrderError> {
        let types = mesh
            .elements
            .iter()
            .enumerate()
            .map(|(cell, element)| {
                CellType::from_vertex_count(element.len()).ok_or(
                    MeshOrderError::UnsupportedTopology {
                        cell,
                        vertices: element.len(),
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let prec = self.options.precision;
        writeln!(writer, "$MeshFormat")?;
        writeln!(writer, "2.2 0 8")?;
        writeln!(writer, "$EndMeshFormat")?;

        writeln!(writer, "$Nodes")?;
        writeln!(writer, "{}", mesh.nodes.len())?;
        for (i, [x, y]) in mesh.nodes.iter().enumerate() {
            writeln!(writer, "{} {x:.prec$} {y:.prec$} 0.0", i + 1)?;
        }
        writeln!(writer, "$EndNodes")?;

        writeln!(writer, "$Elements")?;
        writeln!(writer, "{}", mesh.elements.len())?;
        for (i, (element, ty)) in mesh.elements.iter().zip(&types).enumerate() {
            writeln!(
                writer,
                "{} {} 2 {} {} {}",
                i + 1,
                ty.gmsh_code(),
                self.options.physical_tag,
                self.options.geometry_tag,
                element.iter().join(" ")
            )?;
        }
        writeln!(writer, "$EndElements")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUADS: &str = "$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
6
1 0 0 0
2 1 0 0
3 2 0 0
4 2 1 0
5 1 1 0
6 0 1 0
$EndNodes
$Elements
4
1 15 2 0 1 1
2 1 2 0 1 1 2
3 3 2 0 1 1 2 5 6
4 3 2 0 1 2 3 4 5
$EndElements
";

    #[test]
    fn reads_quads_and_skips_points_and_lines() {
        let mesh = GmshReader.read(TWO_QUADS.as_bytes()).unwrap();
        assert_eq!(mesh.node_count(), 6);
        assert_eq!(mesh.nodes[3], [2.0, 1.0]);
        let ids: Vec<Vec<u64>> = mesh
            .elements
            .iter()
            .map(|e| e.iter().map(|n| n.get()).collect())
            .collect();
        assert_eq!(ids, vec![vec![1, 2, 5, 6], vec![2, 3, 4, 5]]);
    }

    #[test]
    fn writer_formats_six_decimals_and_zero_tags() {
        let mesh = GmshReader.read(TWO_QUADS.as_bytes()).unwrap();
        let mut out = Vec::new();
        GmshWriter::default().write(&mut out, &mesh).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n2 1.000000 0.000000 0.0\n"));
        assert!(text.contains("\n2 3 2 0 0 2 3 4 5\n"));
    }

    #[test]
    fn writer_rejects_pentagon() {
        let mut mesh = GmshReader.read(TWO_QUADS.as_bytes()).unwrap();
        mesh.elements[1].push(NodeId::new(1).unwrap());
        let mut out = Vec::new();
        assert_eq!(
            GmshWriter::default().write(&mut out, &mesh),
            Err(MeshOrderError::UnsupportedTopology {
                cell: 1,
                vertices: 5
            })
        );
        assert!(out.is_empty(), "nothing is written for a rejected mesh");
    }
}
