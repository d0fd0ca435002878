//! # netgraph Prelude
//!
//! This module provides a convenient prelude for the most commonly used types, traits and
//! functions of the netgraph library. Import it to build and analyze graphs without
//! spelling out every module path.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all netgraph operations
pub use crate::Error;

/// The result type used throughout netgraph
pub use crate::Result;

// ================================================================================================
// Containers and Attributes
// ================================================================================================

/// Graph containers
pub use crate::{DiGraph, Graph};

/// Attribute records
pub use crate::{attrs, AttrValue, Attrs, EdgeRecord};

/// Capability traits used by generic code
pub use crate::graph::{Build, GraphBase, NodeId, NodeKey, Predecessors, Successors};

// ================================================================================================
// Algorithms
// ================================================================================================

/// Betweenness and eigenvector centrality and their configuration
pub use crate::algorithms::centrality::{
    betweenness_centrality, edge_betweenness_centrality, eigenvector_centrality, BetweennessConfig,
    EdgeBetweennessConfig, EigenvectorConfig,
};

/// Maximal clique enumeration and statistics
pub use crate::algorithms::clique::{
    find_cliques, find_cliques_recursive, graph_clique_number, graph_number_of_cliques,
    node_number_of_cliques, number_of_cliques,
};

/// Triangles and clustering coefficients
pub use crate::algorithms::cluster::{
    average_clustering, clustering, square_clustering, transitivity, triangles,
};

/// Topological sorting and DAG properties
pub use crate::algorithms::dag::{
    is_aperiodic, is_directed_acyclic_graph, topological_sort, topological_sort_recursive,
};

/// Degree-sequence validation
pub use crate::algorithms::graphical::{is_valid_degree_sequence, DegreeSequenceMethod};

/// Isomorphism pre-checks
pub use crate::algorithms::isomorphism::{
    could_be_isomorphic, fast_could_be_isomorphic, faster_could_be_isomorphic,
};

/// Greedy matching
pub use crate::algorithms::matching::maximal_matching;

/// Binary operators
pub use crate::algorithms::operators::{
    compose, difference, disjoint_union, intersection, symmetric_difference, union,
    union_relabeled,
};

/// Breadth-first and weighted shortest paths
pub use crate::algorithms::shortest_paths::{
    all_pairs_shortest_path_length, bidirectional_shortest_path, dijkstra_path,
    dijkstra_path_length, has_path, predecessor, shortest_path, shortest_path_length,
    single_source_dijkstra_path, single_source_dijkstra_path_length, single_source_shortest_path,
    single_source_shortest_path_length,
};

// ================================================================================================
// Construction and Relabeling
// ================================================================================================

/// Deterministic generators
pub use crate::generators::{
    balanced_tree, complete_graph, cycle_graph, empty_graph, full_rary_tree, grid_2d_graph,
    havel_hakimi_graph, null_graph, path_graph, trivial_graph,
};

/// Relabeling
pub use crate::relabel::{
    convert_node_labels_to_integers, convert_node_labels_to_integers_sorted, relabel_nodes,
    relabel_nodes_from_map, relabel_nodes_in_place, LabelOrdering,
};
