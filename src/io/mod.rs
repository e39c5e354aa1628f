//! Mesh and diagnostic file I/O.
//!
//! Readers and writers work on any `std::io::Read`/`Write`; the `*_path`
//! helpers add file handling, and every file written by this crate goes
//! through [`atomic::write_atomic`] so a failed write never leaves a
//! truncated mesh behind.

pub mod atomic;
pub mod boundary;
pub mod gmsh;
pub mod neighbors;

use crate::mesh_error::MeshOrderError;
use crate::topology::mesh::Mesh2d;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Trait for mesh readers producing a [`Mesh2d`].
pub trait MeshReader {
    /// Parse a mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Mesh2d, MeshOrderError>;

    /// Parse the mesh stored at `path`.
    fn read_path(&self, path: &Path) -> Result<Mesh2d, MeshOrderError> {
        let file = File::open(path).map_err(|e| {
            MeshOrderError::Io(format!("cannot open {}: {e}", path.display()))
        })?;
        let mesh = self.read(BufReader::new(file))?;
        log::info!(
            "mesh read from {}: {} nodes, {} elements",
            path.display(),
            mesh.node_count(),
            mesh.cell_count()
        );
        Ok(mesh)
    }
}

/// Trait for mesh writers serializing a [`Mesh2d`].
pub trait MeshWriter {
    /// Write a mesh to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &Mesh2d) -> Result<(), MeshOrderError>;

    /// Atomically replace the file at `path` with `mesh`.
    fn write_path(&self, path: &Path, mesh: &Mesh2d) -> Result<(), MeshOrderError> {
        atomic::write_atomic(path, |w| self.write(w, mesh))?;
        log::info!("mesh written to {}", path.display());
        Ok(())
    }
}
