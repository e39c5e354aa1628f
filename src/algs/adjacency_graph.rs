//! Cell-to-cell adjacency graph built from interior walls.
//!
//! The graph is stored CSR-style (`xadj`/`adjncy`) over cell indices
//! `[0, n)`. Every neighbor pair inserts both directions, so the graph is
//! symmetric; neighbor lists are sorted and deduplicated, so the layout only
//! depends on the set of pairs and not on their order.

use crate::algs::rcm::CellPermutation;
use crate::mesh_error::MeshOrderError;
use crate::topology::walls::NeighborPair;

/// Symmetric sparse adjacency over cell indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGraph {
    /// CSR offsets into `adjncy` for each cell (`len() + 1` entries).
    pub xadj: Vec<usize>,
    /// Concatenated neighbor lists.
    pub adjncy: Vec<usize>,
}

impl CellGraph {
    /// Build the graph for `cell_count` cells from interior wall pairs.
    ///
    /// # Errors
    /// [`MeshOrderError::CellOutOfRange`] if a pair references a cell
    /// `>= cell_count`.
    pub fn from_neighbors(
        neighbors: &[NeighborPair],
        cell_count: usize,
    ) -> Result<Self, MeshOrderError> {
        Self::from_edges(neighbors.iter().map(|p| (p.c1, p.c2)), cell_count)
    }

    /// Build the graph from undirected `(u, v)` edges. Self-loops are dropped.
    pub fn from_edges(
        edges: impl IntoIterator<Item = (usize, usize)>,
        cell_count: usize,
    ) -> Result<Self, MeshOrderError> {
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); cell_count];
        for (u, v) in edges {
            for c in [u, v] {
                if c >= cell_count {
                    return Err(MeshOrderError::CellOutOfRange {
                        cell: c,
                        cells: cell_count,
                    });
                }
            }
            if u == v {
                continue;
            }
            adj[u].push(v);
            adj[v].push(u);
        }

        let mut xadj = Vec::with_capacity(cell_count + 1);
        let mut adjncy = Vec::new();
        xadj.push(0);
        for mut nbrs in adj {
            nbrs.sort_unstable();
            nbrs.dedup();
            adjncy.extend(nbrs);
            xadj.push(adjncy.len());
        }
        Ok(Self { xadj, adjncy })
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted neighbor slice of cell `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.xadj[i + 1] - self.xadj[i]
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjncy.len() / 2
    }

    /// Matrix bandwidth `max |i - j|` over all edges in the current numbering.
    pub fn bandwidth(&self) -> usize {
        (0..self.len())
            .flat_map(|i| self.neighbors(i).iter().map(move |&j| i.abs_diff(j)))
            .max()
            .unwrap_or(0)
    }

    /// Bandwidth after renumbering with `inverse[old] = new`.
    pub fn bandwidth_under(&self, inverse: &[usize]) -> usize {
        (0..self.len())
            .flat_map(|i| {
                self.neighbors(i)
                    .iter()
                    .map(move |&j| inverse[i].abs_diff(inverse[j]))
            })
            .max()
            .unwrap_or(0)
    }

    /// The same graph with cells relabelled by `permutation` (`perm[new] = old`).
    pub fn renumbered(&self, permutation: &CellPermutation) -> Self {
        let inverse = permutation.inverse();
        let mut xadj = Vec::with_capacity(self.xadj.len());
        let mut adjncy = Vec::with_capacity(self.adjncy.len());
        xadj.push(0);
        for &old in permutation.perm() {
            let start = adjncy.len();
            adjncy.extend(self.neighbors(old).iter().map(|&j| inverse[j]));
            adjncy[start..].sort_unstable();
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }

    /// Connected components, each sorted ascending, ordered by smallest member.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut seen = vec![false; n];
        let mut out = Vec::new();
        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut comp = vec![start];
            let mut head = 0;
            while head < comp.len() {
                let u = comp[head];
                head += 1;
                for &v in self.neighbors(u) {
                    if !seen[v] {
                        seen[v] = true;
                        comp.push(v);
                    }
                }
            }
            comp.sort_unstable();
            out.push(comp);
        }
        out
    }
}
