//! Reverse Cuthill-McKee (RCM) reordering of the cell adjacency graph.
//!
//! Each connected component (isolated cells included) is ordered on its own:
//! 1. find a pseudo-peripheral root with the repeated-BFS heuristic of
//!    George & Liu, starting from the component's minimum-degree cell;
//! 2. run Cuthill-McKee BFS from that root, enqueueing unvisited neighbors
//!    by ascending `(degree, index)`;
//! 3. reverse the component's order.
//!
//! Components are emitted in ascending order of their smallest cell index.
//! All ties break on cell index, so the result is a pure function of the
//! graph.

use crate::algs::adjacency_graph::CellGraph;
use crate::mesh_error::MeshOrderError;

/// Bijection over cell indices: `perm[new] = old`, `inverse[old] = new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPermutation {
    perm: Vec<usize>,
    inverse: Vec<usize>,
}

impl CellPermutation {
    /// Identity over `n` cells.
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
            inverse: (0..n).collect(),
        }
    }

    /// Validate `perm` (new → old) and derive its inverse.
    pub fn from_order(perm: Vec<usize>) -> Result<Self, MeshOrderError> {
        let n = perm.len();
        let mut inverse = vec![usize::MAX; n];
        for (new, &old) in perm.iter().enumerate() {
            if old >= n {
                return Err(MeshOrderError::InvalidPermutation(format!(
                    "index {old} out of range for {n} cells"
                )));
            }
            if inverse[old] != usize::MAX {
                return Err(MeshOrderError::InvalidPermutation(format!(
                    "cell {old} appears twice"
                )));
            }
            inverse[old] = new;
        }
        Ok(Self { perm, inverse })
    }

    /// `perm[new] = old`.
    #[inline]
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// `inverse[old] = new`.
    #[inline]
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.perm.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// Apply `self`, then `next` on the relabelled cells.
    pub fn then(&self, next: &CellPermutation) -> CellPermutation {
        let perm: Vec<usize> = next.perm.iter().map(|&mid| self.perm[mid]).collect();
        let inverse = invert(&perm);
        CellPermutation { perm, inverse }
    }

    /// Reorder `items` so that `out[i] = items[perm[i]]`.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, MeshOrderError> {
        if items.len() != self.perm.len() {
            return Err(MeshOrderError::InvalidPermutation(format!(
                "permutation over {} cells applied to {} items",
                self.perm.len(),
                items.len()
            )));
        }
        Ok(self.perm.iter().map(|&old| items[old].clone()).collect())
    }
}

/// Compute the RCM permutation of `graph`.
pub fn reverse_cuthill_mckee(graph: &CellGraph) -> CellPermutation {
    let n = graph.len();
    let mut order = Vec::with_capacity(n);
    let mut visited = vec![false; n];

    for comp in graph.components() {
        let start = comp
            .iter()
            .copied()
            .min_by_key(|&v| (graph.degree(v), v))
            .unwrap_or(comp[0]);
        let root = find_pseudo_peripheral_root(graph, start);
        let first = order.len();
        cuthill_mckee_from(graph, root, &mut visited, &mut order);
        order[first..].reverse();
    }

    // `components` covers every cell exactly once, so this cannot fail
    let inverse = invert(&order);
    CellPermutation {
        perm: order,
        inverse,
    }
}

/// Repeat RCM on its own output while the bandwidth keeps shrinking.
///
/// The result never widens the band of `graph`: if the first RCM pass is no
/// narrower, the identity is returned. Since the loop only stops once RCM
/// no longer improves on the current numbering, running this again on the
/// renumbered graph yields the identity.
pub fn reduce_bandwidth(graph: &CellGraph) -> CellPermutation {
    let mut total = CellPermutation::identity(graph.len());
    let mut current = graph.clone();
    let mut bandwidth = current.bandwidth();
    loop {
        let step = reverse_cuthill_mckee(&current);
        let narrowed = current.bandwidth_under(step.inverse());
        if narrowed >= bandwidth {
            break;
        }
        log::debug!("RCM pass: bandwidth {bandwidth} -> {narrowed}");
        current = current.renumbered(&step);
        total = total.then(&step);
        bandwidth = narrowed;
    }
    total
}

fn invert(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; perm.len()];
    for (new, &old) in perm.iter().enumerate() {
        inverse[old] = new;
    }
    inverse
}

/// BFS level structure rooted at `root`.
fn level_structure(graph: &CellGraph, root: usize, seen: &mut [bool]) -> Vec<Vec<usize>> {
    let mut levels = vec![vec![root]];
    seen[root] = true;
    loop {
        let mut next = Vec::new();
        if let Some(last) = levels.last() {
            for &u in last {
                for &v in graph.neighbors(u) {
                    if !seen[v] {
                        seen[v] = true;
                        next.push(v);
                    }
                }
            }
        }
        if next.is_empty() {
            break;
        }
        levels.push(next);
    }
    levels
}

/// Find a pseudo-peripheral vertex of `start`'s component.
///
/// Re-roots at the minimum-degree vertex of the deepest BFS level until
/// the eccentricity stops growing.
pub fn find_pseudo_peripheral_root(graph: &CellGraph, start: usize) -> usize {
    let mut seen = vec![false; graph.len()];
    let mut r = start;
    let mut last_depth = 0;
    loop {
        seen.fill(false);
        let levels = level_structure(graph, r, &mut seen);
        let depth = levels.len();
        if depth <= last_depth {
            break;
        }
        last_depth = depth;
        let candidate = levels[depth - 1]
            .iter()
            .copied()
            .min_by_key(|&v| (graph.degree(v), v))
            .unwrap_or(r);
        if candidate == r {
            break;
        }
        r = candidate;
    }
    r
}

/// Cuthill-McKee BFS from `root`, appending visited cells to `order`.
fn cuthill_mckee_from(
    graph: &CellGraph,
    root: usize,
    visited: &mut [bool],
    order: &mut Vec<usize>,
) {
    visited[root] = true;
    let mut head = order.len();
    order.push(root);
    let mut fresh = Vec::new();
    while head < order.len() {
        let u = order[head];
        head += 1;
        fresh.clear();
        fresh.extend(graph.neighbors(u).iter().copied().filter(|&v| !visited[v]));
        fresh.sort_unstable_by_key(|&v| (graph.degree(v), v));
        for &v in &fresh {
            visited[v] = true;
            order.push(v);
        }
    }
}
