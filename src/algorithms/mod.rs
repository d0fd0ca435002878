//! Graph algorithms over the capability traits.
//!
//! Every algorithm is generic over [`Successors`](crate::graph::Successors) (and
//! [`Predecessors`](crate::graph::Predecessors) where in-edges matter), so one
//! implementation serves both [`Graph`](crate::Graph) and [`DiGraph`](crate::DiGraph).
//! Algorithms work on dense [`NodeId`] indices internally and return owned collections
//! keyed by the caller's node values.
//!
//! # Available Algorithms
//!
//! ## Shortest Paths
//!
//! - [`shortest_paths::single_source_shortest_path_length`] - BFS hop counts
//! - [`shortest_paths::single_source_shortest_path`] - BFS paths
//! - [`shortest_paths::all_pairs_shortest_path_length`] - BFS from every node
//! - [`shortest_paths::single_source_dijkstra_path_length`],
//!   [`shortest_paths::single_source_dijkstra_path`] - weighted distances and paths
//! - [`shortest_paths::shortest_path`], [`shortest_paths::shortest_path_length`] -
//!   point to point, bidirectional BFS or Dijkstra
//! - [`shortest_paths::dijkstra_path`], [`shortest_paths::bidirectional_shortest_path`],
//!   [`shortest_paths::has_path`], [`shortest_paths::predecessor`]
//!
//! ## Centrality
//!
//! - [`centrality::betweenness_centrality`] - Brandes node betweenness
//! - [`centrality::edge_betweenness_centrality`] - Brandes edge betweenness
//! - [`centrality::eigenvector_centrality`] - Power iteration
//!
//! ## Clustering
//!
//! - [`cluster::triangles`], [`cluster::transitivity`]
//! - [`cluster::clustering`], [`cluster::average_clustering`] - Weighted or not
//! - [`cluster::square_clustering`]
//!
//! ## Cliques
//!
//! - [`clique::find_cliques`] - Lazy Bron–Kerbosch enumeration
//! - [`clique::find_cliques_recursive`] - Recursive Bron–Kerbosch
//! - [`clique::graph_clique_number`], [`clique::graph_number_of_cliques`],
//!   [`clique::number_of_cliques`], [`clique::node_number_of_cliques`]
//!
//! ## Directed Acyclic Graphs
//!
//! - [`dag::topological_sort`] - Iterative DFS ordering
//! - [`dag::topological_sort_recursive`] - Recursive DFS ordering
//! - [`dag::is_directed_acyclic_graph`] - Cycle check
//! - [`dag::is_aperiodic`] - Cycle-length gcd check
//!
//! ## Degree Sequences
//!
//! - [`graphical::is_valid_degree_sequence`] - Havel–Hakimi or Erdős–Gallai
//!
//! ## Operators, Matching and Isomorphism
//!
//! - [`operators`] - Union, intersection, difference and composition of two graphs
//! - [`matching::maximal_matching`] - Greedy maximal matching
//! - [`isomorphism::could_be_isomorphic`] and its faster variants - Invariant checks
//!
//! # Algorithm Selection
//!
//! | Algorithm | Time Complexity | Notes |
//! |-----------|-----------------|-------|
//! | BFS paths | O(V + E) | per source |
//! | Dijkstra | O((V + E) log V) | non-negative weights only |
//! | Betweenness | O(VE) / O(VE + V² log V) | unweighted / weighted |
//! | Bidirectional BFS | O(V + E) | expands the smaller frontier |
//! | Bron–Kerbosch | O(3^(V/3)) | pivoting on the largest candidate overlap |
//! | Triangles / clustering | O(V d²) | d = maximum degree |
//! | Eigenvector centrality | O(k E) | k power iterations |
//! | Topological sort | O(V + E) | directed graphs only |
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{
//!     algorithms::{centrality, clique},
//!     generators::path_graph,
//!     Graph,
//! };
//!
//! let graph: Graph<usize> = path_graph(3);
//! let scores = centrality::betweenness_centrality(&graph, &Default::default())?;
//! assert_eq!(scores[&1], 1.0);
//!
//! let cliques: Vec<Vec<usize>> = clique::find_cliques(&graph).collect();
//! assert_eq!(cliques.len(), 2);
//! # Ok::<(), netgraph::Error>(())
//! ```

pub mod centrality;
pub mod clique;
pub mod cluster;
pub mod dag;
pub mod graphical;
pub mod isomorphism;
pub mod matching;
pub mod operators;
pub mod shortest_paths;

use crate::{
    graph::{GraphBase, NodeId},
    Error, Result,
};

/// Resolves a caller node to its id, failing with [`Error::NodeNotFound`].
pub(crate) fn lookup<G: GraphBase>(graph: &G, node: &G::Node) -> Result<NodeId> {
    graph.node_id(node).ok_or_else(|| Error::node_not_found(node))
}

/// Resolves an optional node list, defaulting to every node in iteration order.
pub(crate) fn lookup_all<G: GraphBase>(graph: &G, nodes: Option<&[G::Node]>) -> Result<Vec<NodeId>> {
    match nodes {
        None => Ok(graph.node_ids().collect()),
        Some(nodes) => nodes.iter().map(|n| lookup(graph, n)).collect(),
    }
}
