//! Building graphs from external shapes and exporting them back.
//!
//! Every constructor is generic over the target container through [`Build`], so the
//! same edge list can produce a [`Graph`](crate::Graph) or a [`DiGraph`](crate::DiGraph)
//! depending on the requested type.
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{graph::convert, DiGraph, Graph};
//!
//! let undirected: Graph<u32> = convert::from_edges([(1, 2), (2, 3)]);
//! let directed: DiGraph<u32> = convert::from_graph(&undirected);
//!
//! assert_eq!(undirected.number_of_edges(), 2);
//! assert_eq!(directed.number_of_edges(), 4);
//! ```

use tracing::debug;

use crate::graph::{Attrs, Build, Successors};

/// Creates a graph from `(u, v)` pairs.
pub fn from_edges<G, I>(edges: I) -> G
where
    G: Build,
    I: IntoIterator<Item = (G::Node, G::Node)>,
{
    let mut graph = G::default();
    for (u, v) in edges {
        graph.add_edge_with(u, v, Attrs::new());
    }
    graph
}

/// Creates a graph from `(u, v, attrs)` triples.
pub fn from_edges_with_attrs<G, I>(edges: I) -> G
where
    G: Build,
    I: IntoIterator<Item = (G::Node, G::Node, Attrs)>,
{
    let mut graph = G::default();
    for (u, v, attrs) in edges {
        graph.add_edge_with(u, v, attrs);
    }
    graph
}

/// Creates a graph from a `node -> neighbors` mapping.
///
/// Every key becomes a node, including keys with no neighbors. For undirected targets
/// an edge listed under both endpoints is added once.
pub fn from_adjacency<G, I, A>(adjacency: I) -> G
where
    G: Build,
    I: IntoIterator<Item = (G::Node, A)>,
    A: IntoIterator<Item = G::Node>,
{
    let mut graph = G::default();
    let mut pending = Vec::new();
    for (node, neighbors) in adjacency {
        graph.add_node_with(node.clone(), Attrs::new());
        pending.push((node, neighbors));
    }
    for (node, neighbors) in pending {
        for neighbor in neighbors {
            graph.add_edge_with(node.clone(), neighbor, Attrs::new());
        }
    }
    graph
}

/// Copies any graph into a new container, deep-copying every record.
///
/// Converting a directed source into an undirected target merges the two orientations
/// of a reciprocal pair into one edge. Converting an undirected source into a directed
/// target produces both orientations.
pub fn from_graph<S, G>(source: &S) -> G
where
    S: Successors,
    G: Build<Node = S::Node>,
{
    let mut graph = G::default();
    if let Some(record) = source.graph_record() {
        graph.graph_attrs_mut().clone_from(record);
    }

    for id in source.node_ids() {
        let Some(key) = source.node_key(id) else {
            continue;
        };
        let attrs = source.node_record(id).cloned().unwrap_or_default();
        graph.add_node_with(key.clone(), attrs);
    }

    for id in source.node_ids() {
        let Some(u) = source.node_key(id) else {
            continue;
        };
        for (target, record) in source.successor_edges(id) {
            if let Some(v) = source.node_key(target) {
                graph.add_edge_with(u.clone(), v.clone(), record.borrow().clone());
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        directed = graph.is_directed(),
        "converted graph"
    );
    graph
}

/// Returns the adjacency of `graph` as `(node, successors)` pairs in node order.
///
/// With `nodelist`, only the listed nodes are reported and their neighbor lists are
/// restricted to the listed nodes.
pub fn to_adjacency<G: Successors>(
    graph: &G,
    nodelist: Option<&[G::Node]>,
) -> Vec<(G::Node, Vec<G::Node>)> {
    let ids: Vec<_> = match nodelist {
        None => graph.node_ids().collect(),
        Some(nodes) => nodes.iter().filter_map(|n| graph.node_id(n)).collect(),
    };

    ids.iter()
        .filter_map(|&id| {
            let key = graph.node_key(id)?.clone();
            let neighbors = graph
                .successors(id)
                .filter(|target| nodelist.is_none() || ids.contains(target))
                .filter_map(|target| graph.node_key(target).cloned())
                .collect();
            Some((key, neighbors))
        })
        .collect()
}

/// Returns the edges of `graph` as `(u, v)` pairs; undirected edges are listed once.
pub fn to_edges<G: Successors>(graph: &G) -> Vec<(G::Node, G::Node)> {
    graph
        .edge_ids()
        .filter_map(|(u, v)| Some((graph.node_key(u)?.clone(), graph.node_key(v)?.clone())))
        .collect()
}
