//! Betweenness centrality (Brandes) and eigenvector centrality.
//!
//! For every source in a node sample, the shortest-path kernel yields the settle order,
//! predecessor lists and path counts; dependencies are then propagated back along the
//! settle order and added to the node (or edge) tally. The final tally is rescaled
//! depending on normalization, directedness and sampling.
//!
//! [`eigenvector_centrality`] runs the power method: every node repeatedly collects the
//! scores of the nodes with an edge into it, and the vector is renormalized until it
//! stops moving.
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{
//!     algorithms::centrality::{betweenness_centrality, BetweennessConfig},
//!     generators::path_graph,
//!     Graph,
//! };
//!
//! let graph: Graph<usize> = path_graph(3);
//! let scores = betweenness_centrality(&graph, &BetweennessConfig::default().with_normalized(false))?;
//! assert_eq!(scores[&1], 1.0);
//! assert_eq!(scores[&0], 0.0);
//! # Ok::<(), netgraph::Error>(())
//! ```

use std::collections::HashMap;

use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};
use tracing::debug;

use crate::{
    algorithms::shortest_paths::{count_paths, PathCounts},
    graph::{numeric_attr, NodeId, Successors},
    Error, Result,
};

/// Options of [`betweenness_centrality`].
#[derive(Debug, Clone, PartialEq)]
pub struct BetweennessConfig {
    /// Number of sampled sources; all nodes when `None`.
    pub k: Option<usize>,

    /// Divide by the number of node pairs (default: `true`).
    pub normalized: bool,

    /// Edge attribute holding the weight; unweighted when `None`.
    ///
    /// Edges without the attribute weigh `1`.
    pub weight: Option<String>,

    /// Count path endpoints (default: `false`).
    pub endpoints: bool,

    /// Seed for source sampling; sampling is not reproducible without one.
    pub seed: Option<u64>,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        BetweennessConfig {
            k: None,
            normalized: true,
            weight: None,
            endpoints: false,
            seed: None,
        }
    }
}

impl BetweennessConfig {
    /// Samples `k` sources instead of using every node.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets whether results are normalized.
    #[must_use]
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Uses the edge attribute `weight` as edge length.
    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Sets whether path endpoints are counted.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: bool) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Seeds the source sampling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Options of [`edge_betweenness_centrality`].
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeBetweennessConfig {
    /// Divide by the number of node pairs (default: `true`).
    pub normalized: bool,

    /// Edge attribute holding the weight; unweighted when `None`.
    pub weight: Option<String>,
}

impl Default for EdgeBetweennessConfig {
    fn default() -> Self {
        EdgeBetweennessConfig {
            normalized: true,
            weight: None,
        }
    }
}

impl EdgeBetweennessConfig {
    /// Sets whether results are normalized.
    #[must_use]
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Uses the edge attribute `weight` as edge length.
    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }
}

/// Computes the shortest-path betweenness centrality of every node.
///
/// With `k` set, `k` distinct sources are sampled and the result is extrapolated by
/// `n / k` whenever a rescale factor applies.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `k` exceeds the
/// number of nodes, or if a weighted run meets a non-numeric or negative weight.
pub fn betweenness_centrality<G: Successors>(
    graph: &G,
    config: &BetweennessConfig,
) -> Result<HashMap<G::Node, f64>> {
    let n = graph.node_count();
    let sources = sample_sources(graph, config.k, config.seed)?;
    debug!(
        nodes = n,
        sources = sources.len(),
        weighted = config.weight.is_some(),
        "computing betweenness centrality"
    );

    let mut tally = vec![0.0; graph.node_bound()];
    for &source in &sources {
        let counts = count_paths(graph, source, config.weight.as_deref())?;
        if config.endpoints {
            accumulate_endpoints(&mut tally, &counts, source);
        } else {
            accumulate_basic(&mut tally, &counts, source);
        }
    }

    if let Some(scale) = node_scale(n, config.normalized, graph.is_directed(), config.k) {
        for value in &mut tally {
            *value *= scale;
        }
    }

    Ok(graph
        .node_ids()
        .filter_map(|id| Some((graph.node_key(id)?.clone(), tally[id.index()])))
        .collect())
}

/// Computes the shortest-path betweenness centrality of every edge.
///
/// Undirected edges are keyed in the orientation reported by `edges()`; every edge of
/// the graph appears in the result.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if a weighted run
/// meets a non-numeric or negative weight.
pub fn edge_betweenness_centrality<G: Successors>(
    graph: &G,
    config: &EdgeBetweennessConfig,
) -> Result<HashMap<(G::Node, G::Node), f64>> {
    let n = graph.node_count();
    let mut tally: HashMap<(NodeId, NodeId), f64> =
        graph.edge_ids().map(|edge| (edge, 0.0)).collect();
    debug!(nodes = n, edges = tally.len(), "computing edge betweenness centrality");

    for source in graph.node_ids() {
        let counts = count_paths(graph, source, config.weight.as_deref())?;
        accumulate_edges(&mut tally, &counts);
    }

    let scale = edge_scale(n, config.normalized, graph.is_directed());
    Ok(tally
        .into_iter()
        .filter_map(|((u, v), value)| {
            let key = (graph.node_key(u)?.clone(), graph.node_key(v)?.clone());
            Some((key, scale.map_or(value, |scale| value * scale)))
        })
        .collect())
}

/// Options of [`eigenvector_centrality`].
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvectorConfig {
    /// Maximum number of power iterations (default: `100`).
    pub max_iter: usize,

    /// Per-node convergence tolerance (default: `1e-6`).
    ///
    /// Iteration stops once the L1 change of the score vector drops below
    /// `node_count * tolerance`.
    pub tolerance: f64,

    /// Edge attribute holding the weight; every edge weighs `1` when `None`.
    pub weight: Option<String>,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        EigenvectorConfig {
            max_iter: 100,
            tolerance: 1.0e-6,
            weight: None,
        }
    }
}

impl EigenvectorConfig {
    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the per-node tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Uses the edge attribute `weight` as edge weight.
    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }
}

/// Computes the eigenvector centrality of every node by power iteration.
///
/// The scores are the principal eigenvector of the adjacency matrix, scaled to unit
/// Euclidean norm. For directed graphs a node scores through its in-edges. `nstart`
/// gives the starting vector (nodes it omits start at `0`); it is rescaled to sum `1`.
/// Without it every node starts at `1 / n`.
///
/// # Errors
///
/// - [`Error::NotImplemented`] for multigraphs
/// - [`Error::PointlessConcept`] for the null graph
/// - [`Error::InvalidArgument`] if `nstart` sums to zero or a weight is not numeric
/// - [`Error::ConvergenceFailed`] if the vector has not settled after
///   [`EigenvectorConfig::max_iter`] iterations
///
/// # Examples
///
/// ```rust
/// use netgraph::{
///     algorithms::centrality::{eigenvector_centrality, EigenvectorConfig},
///     generators::complete_graph,
///     Graph,
/// };
///
/// let graph: Graph<usize> = complete_graph(5);
/// let scores = eigenvector_centrality(&graph, &EigenvectorConfig::default(), None)?;
/// assert!((scores[&0] - (1.0f64 / 5.0).sqrt()).abs() < 1e-9);
/// # Ok::<(), netgraph::Error>(())
/// ```
pub fn eigenvector_centrality<G: Successors>(
    graph: &G,
    config: &EigenvectorConfig,
    nstart: Option<&HashMap<G::Node, f64>>,
) -> Result<HashMap<G::Node, f64>> {
    if graph.is_multigraph() {
        return Err(not_implemented!("Not defined for multigraphs."));
    }
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::PointlessConcept(
            "Cannot compute centrality for the null graph.".to_string(),
        ));
    }

    let ids: Vec<NodeId> = graph.node_ids().collect();
    let mut x = vec![0.0; graph.node_bound()];
    match nstart {
        None => ids.iter().for_each(|id| x[id.index()] = 1.0 / n as f64),
        Some(start) => {
            for id in &ids {
                x[id.index()] = graph
                    .node_key(*id)
                    .and_then(|key| start.get(key))
                    .copied()
                    .unwrap_or(0.0);
            }
            let total: f64 = x.iter().sum();
            if total == 0.0 {
                return Err(invalid_argument!("Initial vector nstart must not sum to zero"));
            }
            x.iter_mut().for_each(|value| *value /= total);
        }
    }

    // Edge weights are read once up front.
    let mut edges: Vec<(NodeId, NodeId, f64)> = Vec::new();
    for &u in &ids {
        for (v, record) in graph.successor_edges(u) {
            let w = match config.weight.as_deref() {
                None => 1.0,
                Some(weight) => numeric_attr(record, weight).ok_or_else(|| {
                    invalid_argument!("Edge attribute {:?} is not numeric", weight)
                })?,
            };
            edges.push((u, v, w));
        }
    }

    let threshold = n as f64 * config.tolerance;
    for iteration in 0..config.max_iter {
        let last = std::mem::replace(&mut x, vec![0.0; graph.node_bound()]);
        for &(u, v, w) in &edges {
            x[v.index()] += last[u.index()] * w;
        }

        let norm = x.iter().map(|value| value * value).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        x.iter_mut().for_each(|value| *value /= norm);

        let change: f64 = ids.iter().map(|id| (x[id.index()] - last[id.index()]).abs()).sum();
        if change < threshold {
            debug!(iterations = iteration + 1, "eigenvector centrality converged");
            return Ok(ids
                .iter()
                .filter_map(|&id| Some((graph.node_key(id)?.clone(), x[id.index()])))
                .collect());
        }
    }
    Err(Error::ConvergenceFailed(config.max_iter))
}

fn sample_sources<G: Successors>(
    graph: &G,
    k: Option<usize>,
    seed: Option<u64>,
) -> Result<Vec<NodeId>> {
    let nodes: Vec<NodeId> = graph.node_ids().collect();
    let Some(k) = k else {
        return Ok(nodes);
    };
    if k > nodes.len() {
        return Err(invalid_argument!(
            "Sample size k={} is larger than the number of nodes ({})",
            k,
            nodes.len()
        ));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut sample: Vec<NodeId> = nodes.choose_multiple(&mut rng, k).copied().collect();
    sample.sort_unstable();
    Ok(sample)
}

fn accumulate_basic(tally: &mut [f64], counts: &PathCounts, source: NodeId) {
    let mut delta = vec![0.0; tally.len()];
    for &w in counts.order.iter().rev() {
        let coeff = (1.0 + delta[w.index()]) / counts.sigma[w.index()];
        for &v in &counts.preds[w.index()] {
            delta[v.index()] += counts.sigma[v.index()] * coeff;
        }
        if w != source {
            tally[w.index()] += delta[w.index()];
        }
    }
}

fn accumulate_endpoints(tally: &mut [f64], counts: &PathCounts, source: NodeId) {
    tally[source.index()] += counts.order.len().saturating_sub(1) as f64;
    let mut delta = vec![0.0; tally.len()];
    for &w in counts.order.iter().rev() {
        let coeff = (1.0 + delta[w.index()]) / counts.sigma[w.index()];
        for &v in &counts.preds[w.index()] {
            delta[v.index()] += counts.sigma[v.index()] * coeff;
        }
        if w != source {
            tally[w.index()] += delta[w.index()] + 1.0;
        }
    }
}

fn accumulate_edges(tally: &mut HashMap<(NodeId, NodeId), f64>, counts: &PathCounts) {
    let mut delta = vec![0.0; counts.sigma.len()];
    for &w in counts.order.iter().rev() {
        let coeff = (1.0 + delta[w.index()]) / counts.sigma[w.index()];
        for &v in &counts.preds[w.index()] {
            let share = counts.sigma[v.index()] * coeff;
            if let Some(value) = tally.get_mut(&(v, w)) {
                *value += share;
            } else if let Some(value) = tally.get_mut(&(w, v)) {
                *value += share;
            }
            delta[v.index()] += share;
        }
    }
}

fn node_scale(n: usize, normalized: bool, directed: bool, k: Option<usize>) -> Option<f64> {
    let scale = if normalized {
        (n > 2).then(|| 1.0 / ((n - 1) as f64 * (n - 2) as f64))
    } else if !directed {
        Some(0.5)
    } else {
        None
    };
    match (scale, k) {
        (Some(scale), Some(k)) if k > 0 => Some(scale * n as f64 / k as f64),
        (scale, _) => scale,
    }
}

fn edge_scale(n: usize, normalized: bool, directed: bool) -> Option<f64> {
    if normalized {
        (n > 1).then(|| 1.0 / (n as f64 * (n - 1) as f64))
    } else if !directed {
        Some(0.5)
    } else {
        None
    }
}
