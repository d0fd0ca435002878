//! Deterministic graph generators.
//!
//! Generators are generic over [`Build`](crate::graph::Build), so the same function
//! produces a [`Graph`](crate::Graph) or a [`DiGraph`](crate::DiGraph) depending on the
//! requested return type. Nodes are the integers `0..n` (the lattice of
//! [`grid_2d_graph`] uses `(row, column)` pairs) and every generated graph gets a
//! descriptive `name` attribute.
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{generators::cycle_graph, DiGraph, Graph};
//!
//! let undirected: Graph<usize> = cycle_graph(4);
//! assert!(undirected.has_edge(&1, &0));
//!
//! let directed: DiGraph<usize> = cycle_graph(4);
//! assert!(!directed.has_edge(&1, &0));
//! assert_eq!(directed.name(), "cycle_graph(4)");
//! ```

mod classic;
mod degree_sequence;

pub use classic::{
    balanced_tree, complete_graph, cycle_graph, empty_graph, full_rary_tree, grid_2d_graph,
    null_graph, path_graph, trivial_graph,
};
pub use degree_sequence::havel_hakimi_graph;

use crate::graph::{AttrValue, Build};

fn set_name<G: Build>(graph: &mut G, name: String) {
    graph
        .graph_attrs_mut()
        .insert("name".to_string(), AttrValue::Str(name));
}
