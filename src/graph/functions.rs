//! Free functions operating on any graph container.

use std::{collections::HashMap, fmt::Write};

use crate::{
    graph::{attrs, AttrValue, Build, GraphBase, NodeId, Predecessors, Successors},
    Error, Result,
};

/// Degree of a node by id: in + out for directed graphs, self-loops counted twice for
/// undirected ones.
pub(crate) fn degree_of<G: Successors + Predecessors>(graph: &G, id: NodeId) -> usize {
    if graph.is_directed() {
        graph.successors(id).count() + graph.predecessors(id).count()
    } else {
        graph
            .successors(id)
            .map(|target| if target == id { 2 } else { 1 })
            .sum()
    }
}

/// Returns the density of the graph.
///
/// `2m / (n(n-1))` for undirected graphs, `m / (n(n-1))` for directed ones, and `0` for
/// graphs without edges.
///
/// # Examples
///
/// ```rust
/// use netgraph::{generators::complete_graph, graph::functions::density, Graph};
///
/// let graph: Graph<usize> = complete_graph(4);
/// assert_eq!(density(&graph), 1.0);
/// ```
pub fn density<G: Successors>(graph: &G) -> f64 {
    let n = graph.node_count() as f64;
    let m = graph.edge_ids().count() as f64;
    if m == 0.0 || n < 2.0 {
        return 0.0;
    }
    if graph.is_directed() {
        m / (n * (n - 1.0))
    } else {
        2.0 * m / (n * (n - 1.0))
    }
}

/// Returns the frequency of each degree value, indexed by degree.
pub fn degree_histogram<G: Successors + Predecessors>(graph: &G) -> Vec<usize> {
    let degrees: Vec<usize> = graph.node_ids().map(|id| degree_of(graph, id)).collect();
    let Some(&max) = degrees.iter().max() else {
        return Vec::new();
    };
    let mut freq = vec![0; max + 1];
    for degree in degrees {
        freq[degree] += 1;
    }
    freq
}

/// Sets the attribute `name` on every listed node.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] for the first node that is not in the graph; the
/// assignments before it have been applied.
pub fn set_node_attributes<G, I>(graph: &mut G, name: &str, values: I) -> Result<()>
where
    G: Build,
    I: IntoIterator<Item = (G::Node, AttrValue)>,
{
    for (node, value) in values {
        if graph.node_id(&node).is_none() {
            return Err(Error::node_not_found(&node));
        }
        graph.add_node_with(node, attrs([(name, value)]));
    }
    Ok(())
}

/// Returns the value of attribute `name` for every node carrying it.
pub fn get_node_attributes<G: GraphBase>(graph: &G, name: &str) -> HashMap<G::Node, AttrValue> {
    graph
        .node_ids()
        .filter_map(|id| {
            let value = graph.node_record(id)?.get(name)?.clone();
            Some((graph.node_key(id)?.clone(), value))
        })
        .collect()
}

/// Sets the attribute `name` on every listed edge.
///
/// The value is written into the shared edge record, so for undirected graphs it is
/// visible from both orientations.
///
/// # Errors
///
/// Returns [`Error::EdgeNotFound`] for the first edge that is not in the graph.
pub fn set_edge_attributes<G, I>(graph: &G, name: &str, values: I) -> Result<()>
where
    G: Successors,
    I: IntoIterator<Item = ((G::Node, G::Node), AttrValue)>,
{
    for ((u, v), value) in values {
        let record = graph
            .node_id(&u)
            .zip(graph.node_id(&v))
            .and_then(|(uid, vid)| graph.edge_record(uid, vid))
            .ok_or_else(|| Error::edge_not_found(&u, &v))?;
        record.borrow_mut().insert(name.to_string(), value);
    }
    Ok(())
}

/// Returns the value of attribute `name` for every edge carrying it.
///
/// Undirected edges are keyed in the orientation reported by `edges()`.
pub fn get_edge_attributes<G: Successors>(
    graph: &G,
    name: &str,
) -> HashMap<(G::Node, G::Node), AttrValue> {
    graph
        .edge_ids()
        .filter_map(|(u, v)| {
            let value = graph.edge_record(u, v)?.borrow().get(name)?.clone();
            Some(((graph.node_key(u)?.clone(), graph.node_key(v)?.clone()), value))
        })
        .collect()
}

/// Returns an edgeless graph of the same kind, optionally keeping the nodes.
///
/// Node attributes are not carried over.
pub fn create_empty_copy<G: Build>(graph: &G, with_nodes: bool) -> G {
    let mut copy = G::default();
    if with_nodes {
        for id in graph.node_ids() {
            if let Some(key) = graph.node_key(id) {
                copy.add_node_with(key.clone(), Default::default());
            }
        }
    }
    copy
}

/// Returns a short textual summary of the graph, or of a single node.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if `node` is given and not in the graph.
pub fn info<G>(graph: &G, node: Option<&G::Node>) -> Result<String>
where
    G: Successors + Predecessors,
{
    let mut out = String::new();
    match node {
        None => {
            let name = graph
                .graph_record()
                .and_then(|record| record.get("name"))
                .and_then(AttrValue::as_str)
                .unwrap_or("");
            let kind = if graph.is_directed() { "DiGraph" } else { "Graph" };
            let nodes = graph.node_count();
            let _ = writeln!(out, "Name: {name}");
            let _ = writeln!(out, "Type: {kind}");
            let _ = writeln!(out, "Number of nodes: {nodes}");
            let _ = writeln!(out, "Number of edges: {}", graph.edge_ids().count());

            if nodes > 0 {
                let n = nodes as f64;
                if graph.is_directed() {
                    let in_sum: usize = graph.node_ids().map(|id| graph.predecessors(id).count()).sum();
                    let out_sum: usize = graph.node_ids().map(|id| graph.successors(id).count()).sum();
                    let _ = write!(
                        out,
                        "Average in degree: {:.4}\nAverage out degree: {:.4}",
                        in_sum as f64 / n,
                        out_sum as f64 / n
                    );
                } else {
                    let sum: usize = graph.node_ids().map(|id| degree_of(graph, id)).sum();
                    let _ = write!(out, "Average degree: {:.4}", sum as f64 / n);
                }
            }
        }
        Some(n) => {
            let id = graph.node_id(n).ok_or_else(|| Error::node_not_found(n))?;
            let neighbors: Vec<String> = graph
                .successors(id)
                .filter_map(|target| graph.node_key(target))
                .map(|key| format!("{key:?}"))
                .collect();
            let _ = write!(
                out,
                "Node {n:?} has the following properties:\nDegree: {}\nNeighbors: {}",
                degree_of(graph, id),
                neighbors.join(" ")
            );
        }
    }
    Ok(out)
}
