//! Diffusion over arbitrary node graphs
//!
//! Mesh-like domains expose their connectivity through [`NodeGraph`]: per
//! node, the outgoing edges with a stable edge index used to look up
//! per-edge weights. [`AdjacencyList`] is a compact implementation backed by
//! a compressed sparse row layout.

use crate::core_types::FieldError;
use crate::grid::partition::for_each_partition;
use crate::grid::Grid2;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

/// Outgoing edge of a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    /// Node at the other end of the edge
    pub target: usize,
    /// Stable index of this directed edge, in `[0, edge_count)`
    pub index: usize,
}

/// Per-node edge enumeration consumed by graph operators
pub trait NodeGraph: Sync {
    /// Number of nodes
    fn node_count(&self) -> usize;

    /// Number of directed edges
    fn edge_count(&self) -> usize;

    /// Outgoing edges of `node`
    fn edges(&self, node: usize) -> impl Iterator<Item = GraphEdge> + '_;
}

/// Undirected graph stored as directed edge pairs in CSR form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl AdjacencyList {
    /// Build from undirected node pairs
    ///
    /// Each pair contributes one edge in each direction. Repeated pairs (in
    /// either orientation) are kept once.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfig`] for a self-loop or a node index
    /// outside `[0, node_count)`
    pub fn from_edges(node_count: usize, pairs: &[(usize, usize)]) -> Result<Self, FieldError> {
        let mut seen = FxHashSet::default();
        let mut unique = Vec::with_capacity(pairs.len());

        for &(a, b) in pairs {
            if a >= node_count || b >= node_count {
                return Err(FieldError::InvalidConfig(format!(
                    "edge ({a}, {b}) references a node outside 0..{node_count}"
                )));
            }
            if a == b {
                return Err(FieldError::InvalidConfig(format!(
                    "self-loop on node {a}"
                )));
            }
            if seen.insert((a.min(b), a.max(b))) {
                unique.push((a, b));
            }
        }

        let graph = Self::from_pairs(node_count, &unique);

        debug!(
            "Built adjacency list: {} nodes, {} undirected edges ({} duplicates dropped)",
            node_count,
            unique.len(),
            pairs.len() - unique.len()
        );

        Ok(graph)
    }

    /// 4-connected adjacency of a 2D grid, clipped at the edges
    pub fn from_grid2(grid: &Grid2) -> Self {
        let (nx, ny) = (grid.count_x(), grid.count_y());
        let mut pairs = Vec::with_capacity(2 * grid.count());

        for j in 0..ny {
            for i in 0..nx {
                let index = grid.flatten_index(i, j);
                if i + 1 < nx {
                    pairs.push((index, index + 1));
                }
                if j + 1 < ny {
                    pairs.push((index, index + nx));
                }
            }
        }

        // grid pairs are in range and distinct
        Self::from_pairs(grid.count(), &pairs)
    }

    fn from_pairs(node_count: usize, pairs: &[(usize, usize)]) -> Self {
        let mut offsets = vec![0; node_count + 1];
        for &(a, b) in pairs {
            offsets[a + 1] += 1;
            offsets[b + 1] += 1;
        }
        for node in 0..node_count {
            offsets[node + 1] += offsets[node];
        }

        let mut fill = offsets.clone();
        let mut targets = vec![0; pairs.len() * 2];
        for &(a, b) in pairs {
            targets[fill[a]] = b;
            fill[a] += 1;
            targets[fill[b]] = a;
            fill[b] += 1;
        }

        Self { offsets, targets }
    }

    /// Number of edges leaving `node`
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Neighbour node indices of `node`
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }
}

impl NodeGraph for AdjacencyList {
    fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn edge_count(&self) -> usize {
        self.targets.len()
    }

    fn edges(&self, node: usize) -> impl Iterator<Item = GraphEdge> + '_ {
        let start = self.offsets[node];
        self.neighbors(node)
            .iter()
            .enumerate()
            .map(move |(k, &target)| GraphEdge {
                target,
                index: start + k,
            })
    }
}

/// Accumulate uniform graph diffusion: `(mean(neighbours) − v) · rate`
///
/// Nodes without edges receive nothing.
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if `values` or `deltas` is not
/// one entry per node
pub fn diffuse_graph<G: NodeGraph>(
    graph: &G,
    values: &[f64],
    deltas: &mut [f64],
    rate: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    FieldError::check_len(graph.node_count(), values.len())?;
    FieldError::check_len(graph.node_count(), deltas.len())?;

    for_each_partition(deltas, parallel, |start, chunk| {
        trace!("diffuse_graph partition start={} len={}", start, chunk.len());
        for (offset, delta) in chunk.iter_mut().enumerate() {
            let node = start + offset;
            let (sum, degree) = graph
                .edges(node)
                .fold((0.0, 0_usize), |(sum, n), e| (sum + values[e.target], n + 1));

            if degree > 0 {
                *delta += (sum / degree as f64 - values[node]) * rate;
            }
        }
    });

    Ok(())
}

/// Accumulate weighted graph diffusion: `Σ (v_n − v) · w_e · rate`
///
/// `weights` holds one entry per directed edge, indexed by
/// [`GraphEdge::index`].
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if `values`, `deltas` or
/// `weights` has the wrong length
pub fn diffuse_graph_weighted<G: NodeGraph>(
    graph: &G,
    values: &[f64],
    weights: &[f64],
    deltas: &mut [f64],
    rate: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    FieldError::check_len(graph.node_count(), values.len())?;
    FieldError::check_len(graph.node_count(), deltas.len())?;
    FieldError::check_len(graph.edge_count(), weights.len())?;

    for_each_partition(deltas, parallel, |start, chunk| {
        trace!("diffuse_graph_weighted partition start={} len={}", start, chunk.len());
        for (offset, delta) in chunk.iter_mut().enumerate() {
            let node = start + offset;
            let v = values[node];
            let sum: f64 = graph
                .edges(node)
                .map(|e| (values[e.target] - v) * weights[e.index])
                .sum();

            *delta += sum * rate;
        }
    });

    Ok(())
}
