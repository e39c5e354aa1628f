//! Ordering workflow over one mesh file.
//!
//! An [`OrderingSession`] holds the mesh, its neighbor list and boundary
//! node set between user actions. The mesh file on disk stays the single
//! source of truth: [`OrderingSession::optimize`] rewrites it atomically,
//! and a new session must be opened whenever the mesh is regenerated.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algs::boundary::order_zone_nodes;
use crate::algs::renumber::{CellReordering, reorder_cells};
use crate::geometry::polygon::Region;
use crate::io::atomic::write_atomic;
use crate::io::gmsh::{GmshReader, GmshWriter};
use crate::io::neighbors::write_neighbor_list;
use crate::io::{MeshReader, MeshWriter};
use crate::mesh_error::MeshOrderError;
use crate::topology::mesh::Mesh2d;
use crate::topology::point::NodeId;
use crate::topology::walls::{MeshTopology, NeighborPair, WallCounts};

/// Files the session reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Gmsh v2 mesh, read on open and rewritten by `optimize`.
    pub mesh_file: PathBuf,
    /// Where `optimize` also writes the recomputed neighbor list.
    #[serde(default)]
    pub neighbor_file: Option<PathBuf>,
    #[serde(default)]
    pub writer: crate::io::gmsh::GmshWriteOptions,
}

impl SessionOptions {
    pub fn new(mesh_file: impl Into<PathBuf>) -> Self {
        Self {
            mesh_file: mesh_file.into(),
            neighbor_file: None,
            writer: Default::default(),
        }
    }
}

/// Mesh plus derived adjacency, valid until the mesh file changes.
#[derive(Debug, Clone)]
pub struct OrderingSession {
    options: SessionOptions,
    mesh: Mesh2d,
    neighbors: Vec<NeighborPair>,
    counts: WallCounts,
    boundary_nodes: BTreeSet<NodeId>,
}

impl OrderingSession {
    /// Read the mesh file and derive its walls and neighbor pairs.
    pub fn open(options: SessionOptions) -> Result<Self, MeshOrderError> {
        let mesh = GmshReader.read_path(&options.mesh_file)?;
        Self::from_mesh(options, mesh)
    }

    /// Start a session from an in-memory mesh (written back to
    /// `options.mesh_file` by [`optimize`](Self::optimize)).
    pub fn from_mesh(options: SessionOptions, mesh: Mesh2d) -> Result<Self, MeshOrderError> {
        mesh.validate()?;
        log::info!(
            "number of nodes: {}, number of elements: {}",
            mesh.node_count(),
            mesh.cell_count()
        );
        let topo = MeshTopology::build(&mesh.elements)?;
        Ok(Self {
            options,
            mesh,
            neighbors: topo.neighbors,
            counts: topo.counts,
            boundary_nodes: topo.boundary_nodes,
        })
    }

    pub fn mesh(&self) -> &Mesh2d {
        &self.mesh
    }

    pub fn neighbors(&self) -> &[NeighborPair] {
        &self.neighbors
    }

    pub fn wall_counts(&self) -> WallCounts {
        self.counts
    }

    /// Node ids on the mesh perimeter.
    pub fn boundary_nodes(&self) -> &BTreeSet<NodeId> {
        &self.boundary_nodes
    }

    /// Lower-triangle `(row, col)` entries of the cell connectivity matrix,
    /// sorted by row then column.
    pub fn connectivity_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = self.neighbors.iter().map(|p| (p.c2, p.c1)).collect();
        pairs.sort_unstable();
        pairs
    }

    /// Reorder cells with RCM, rebuild the neighbor list and atomically
    /// rewrite the mesh file (and neighbor file, if configured).
    ///
    /// The session adopts the new order as soon as the mesh file has been
    /// replaced, so it matches the disk even if the neighbor file then
    /// fails to write.
    pub fn optimize(&mut self) -> Result<CellReordering, MeshOrderError> {
        let reordering = reorder_cells(&self.mesh.elements, &self.neighbors)?;
        let mesh = Mesh2d::new(self.mesh.nodes.clone(), reordering.elements.clone());

        GmshWriter::with_options(self.options.writer).write_path(&self.options.mesh_file, &mesh)?;
        self.mesh = mesh;
        self.neighbors = reordering.neighbors.clone();

        if let Some(path) = &self.options.neighbor_file {
            self.export_neighbors(path, &reordering.neighbors)?;
        }
        Ok(reordering)
    }

    /// Write `neighbors` as a neighbor list diagnostic file.
    pub fn export_neighbors(
        &self,
        path: &Path,
        neighbors: &[NeighborPair],
    ) -> Result<(), MeshOrderError> {
        write_atomic(path, |w| write_neighbor_list(w, neighbors))?;
        log::info!("neighbor list written to {}", path.display());
        Ok(())
    }

    /// Ordered boundary node sequence of the zone delimited by `region`.
    pub fn zone_nodes<R: Region + ?Sized>(&self, region: &R) -> Result<Vec<NodeId>, MeshOrderError> {
        order_zone_nodes(&self.mesh, &self.boundary_nodes, region)
    }
}
