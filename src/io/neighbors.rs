//! Neighbor list export (`n1 n2 c1 c2 iw1 iw2`), a diagnostic artifact.

use crate::mesh_error::MeshOrderError;
use crate::topology::point::NodeId;
use crate::topology::walls::NeighborPair;
use std::io::{BufRead, Write};

pub const NEIGHBOR_HEADER: &str = "n1 n2 c1 c2 iw1 iw2";

/// Write the header line followed by one line per pair.
pub fn write_neighbor_list<W: Write>(
    mut writer: W,
    neighbors: &[NeighborPair],
) -> Result<(), MeshOrderError> {
    writeln!(writer, "{NEIGHBOR_HEADER}")?;
    for p in neighbors {
        writeln!(
            writer,
            "{} {} {} {} {} {}",
            p.n1, p.n2, p.c1, p.c2, p.iw1, p.iw2
        )?;
    }
    Ok(())
}

/// Parse a file produced by [`write_neighbor_list`].
pub fn read_neighbor_list<R: BufRead>(reader: R) -> Result<Vec<NeighborPair>, MeshOrderError> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| MeshOrderError::Format("empty neighbor list".into()))?;
    if header.split_whitespace().ne(NEIGHBOR_HEADER.split_whitespace()) {
        return Err(MeshOrderError::Format(format!(
            "unexpected neighbor list header: {header}"
        )));
    }

    let mut out = Vec::new();
    for (lineno, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = line
            .split_whitespace()
            .map(|f| f.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                MeshOrderError::Format(format!("invalid neighbor record at line {}", lineno + 2))
            })?;
        let [n1, n2, c1, c2, iw1, iw2] = fields[..] else {
            return Err(MeshOrderError::Format(format!(
                "neighbor record at line {} has {} fields, expected 6",
                lineno + 2,
                fields.len()
            )));
        };
        let index = |raw: u64| {
            usize::try_from(raw).map_err(|_| {
                MeshOrderError::Format(format!(
                    "index {raw} at line {} does not fit in usize",
                    lineno + 2
                ))
            })
        };
        out.push(NeighborPair {
            c1: index(c1)?,
            c2: index(c2)?,
            iw1: index(iw1)?,
            iw2: index(iw2)?,
            n1: NodeId::new(n1)?,
            n2: NodeId::new(n2)?,
        });
    }
    Ok(out)
}
