//! Triangle counts and clustering coefficients.
//!
//! All measures here are defined for undirected simple graphs only; directed graphs and
//! multigraphs are rejected with [`Error::NotImplemented`](crate::Error::NotImplemented).
//! Self-loops are ignored throughout.
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{algorithms::cluster::{clustering, transitivity, triangles}, generators::complete_graph, Graph};
//!
//! let mut graph: Graph<usize> = complete_graph(5);
//! graph.remove_edge(&1, &2)?;
//!
//! assert_eq!(triangles(&graph, None)?[&0], 5);
//! assert_eq!(clustering(&graph, Some(&[1]), None)?[&1], 1.0);
//! assert_eq!(transitivity(&graph)?, 0.875);
//! # Ok::<(), netgraph::Error>(())
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::{
    algorithms::{
        clique::{loopless_adjacency, IdSet},
        lookup_all,
    },
    graph::{numeric_attr, EdgeRecord, GraphBase, NodeId, Successors},
    Error, Result,
};

fn undirected_only<G: GraphBase>(graph: &G) -> Result<()> {
    if graph.is_directed() {
        return Err(not_implemented!("Clustering algorithms are not defined for directed graphs."));
    }
    if graph.is_multigraph() {
        return Err(not_implemented!("Not defined for multigraphs."));
    }
    Ok(())
}

/// Twice the number of triangles through `v`.
fn double_triangles(adj: &[IdSet], v: NodeId) -> usize {
    let nbrs = &adj[v.index()];
    nbrs.iter()
        .map(|w| nbrs.intersection(&adj[w.index()]).count())
        .sum()
}

fn edge_weight(record: &EdgeRecord, weight: &str) -> Result<f64> {
    numeric_attr(record, weight)
        .ok_or_else(|| invalid_argument!("Edge attribute {:?} is not numeric", weight))
}

/// Twice the sum of geometric-mean triangle weights through `i`, with weights scaled by
/// `max_weight`.
fn double_weighted_triangles<G: Successors>(
    graph: &G,
    adj: &[IdSet],
    i: NodeId,
    weight: &str,
    max_weight: f64,
) -> Result<f64> {
    let scaled = |u: NodeId, v: NodeId| -> Result<f64> {
        match graph.edge_record(u, v) {
            Some(record) => Ok(edge_weight(record, weight)? / max_weight),
            None => Ok(0.0),
        }
    };

    let inbrs = &adj[i.index()];
    let mut seen = IdSet::new();
    let mut total = 0.0;
    for &j in inbrs {
        let w_ij = scaled(i, j)?;
        seen.insert(j);
        for &k in inbrs.intersection(&adj[j.index()]) {
            if seen.contains(&k) {
                continue;
            }
            total += (w_ij * scaled(j, k)? * scaled(k, i)?).cbrt();
        }
    }
    Ok(2.0 * total)
}

fn max_edge_weight<G: Successors>(graph: &G, weight: &str) -> Result<f64> {
    let mut max: Option<f64> = None;
    for (u, v) in graph.edge_ids() {
        if let Some(record) = graph.edge_record(u, v) {
            let w = edge_weight(record, weight)?;
            max = Some(max.map_or(w, |m: f64| m.max(w)));
        }
    }
    Ok(max.unwrap_or(1.0))
}

/// Returns the number of triangles through each node.
///
/// # Errors
///
/// - [`Error::NotImplemented`] for directed graphs and multigraphs
/// - [`Error::NodeNotFound`] if a listed node is not in the graph
pub fn triangles<G: Successors>(
    graph: &G,
    nodes: Option<&[G::Node]>,
) -> Result<HashMap<G::Node, usize>> {
    undirected_only(graph)?;
    let ids = lookup_all(graph, nodes)?;
    let adj = loopless_adjacency(graph);
    Ok(ids
        .into_iter()
        .filter_map(|id| Some((graph.node_key(id)?.clone(), double_triangles(&adj, id) / 2)))
        .collect())
}

/// Returns the clustering coefficient of each node.
///
/// Unweighted, this is the fraction of neighbor pairs that are adjacent:
/// `2 T(u) / (deg(u) (deg(u) - 1))`. With `weight`, each triangle contributes the cube
/// root of the product of its edge weights, each divided by the largest weight in the
/// graph. Edges without the attribute weigh `1`. Nodes of degree below two score `0`.
///
/// # Errors
///
/// - [`Error::NotImplemented`] for directed graphs and multigraphs
/// - [`Error::NodeNotFound`] if a listed node is not in the graph
/// - [`Error::InvalidArgument`] if a weight is not numeric
pub fn clustering<G: Successors>(
    graph: &G,
    nodes: Option<&[G::Node]>,
    weight: Option<&str>,
) -> Result<HashMap<G::Node, f64>> {
    undirected_only(graph)?;
    let ids = lookup_all(graph, nodes)?;
    let adj = loopless_adjacency(graph);
    let max_weight = match weight {
        Some(weight) => max_edge_weight(graph, weight)?,
        None => 1.0,
    };

    let mut scores = HashMap::with_capacity(ids.len());
    for id in ids {
        let Some(key) = graph.node_key(id) else {
            continue;
        };
        let degree = adj[id.index()].len() as f64;
        let triangles = match weight {
            None => double_triangles(&adj, id) as f64,
            Some(weight) => double_weighted_triangles(graph, &adj, id, weight, max_weight)?,
        };
        let score = if triangles == 0.0 {
            0.0
        } else {
            triangles / (degree * (degree - 1.0))
        };
        scores.insert(key.clone(), score);
    }
    Ok(scores)
}

/// Returns the mean clustering coefficient over `nodes` (all nodes by default).
///
/// With `count_zeros` false, nodes scoring `0` are left out of the mean.
///
/// # Errors
///
/// Those of [`clustering`], and [`Error::PointlessConcept`] when no node remains to
/// average over.
pub fn average_clustering<G: Successors>(
    graph: &G,
    nodes: Option<&[G::Node]>,
    weight: Option<&str>,
    count_zeros: bool,
) -> Result<f64> {
    let scores: Vec<f64> = clustering(graph, nodes, weight)?
        .into_values()
        .filter(|&c| count_zeros || c > 0.0)
        .collect();
    if scores.is_empty() {
        return Err(Error::PointlessConcept(
            "Average clustering is not defined without nodes.".to_string(),
        ));
    }
    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Returns the fraction of connected triples that close into triangles.
///
/// # Errors
///
/// Returns [`Error::NotImplemented`] for directed graphs and multigraphs.
pub fn transitivity<G: Successors>(graph: &G) -> Result<f64> {
    undirected_only(graph)?;
    let adj = loopless_adjacency(graph);
    let (mut triangles, mut triples) = (0usize, 0usize);
    for id in graph.node_ids() {
        let degree = adj[id.index()].len();
        triples += degree * degree.saturating_sub(1);
        triangles += double_triangles(&adj, id);
    }
    debug!(triangles = triangles / 6, triples = triples / 2, "transitivity");
    if triangles == 0 {
        return Ok(0.0);
    }
    Ok(triangles as f64 / triples as f64)
}

/// Returns the square clustering coefficient of each node.
///
/// For a node `v`, every pair of neighbors `u, w` contributes its common neighbors other
/// than `v` (the squares through `v`) to the numerator. The denominator adds, per pair,
/// the squares and the product of the degrees of `u` and `w` left after discounting
/// those squares, `v` and the edge `u-w` if present.
///
/// # Errors
///
/// - [`Error::NotImplemented`] for directed graphs and multigraphs
/// - [`Error::NodeNotFound`] if a listed node is not in the graph
pub fn square_clustering<G: Successors>(
    graph: &G,
    nodes: Option<&[G::Node]>,
) -> Result<HashMap<G::Node, f64>> {
    undirected_only(graph)?;
    let ids = lookup_all(graph, nodes)?;
    let adj = loopless_adjacency(graph);

    let mut scores = HashMap::with_capacity(ids.len());
    for v in ids {
        let Some(key) = graph.node_key(v) else {
            continue;
        };
        let nbrs: Vec<NodeId> = adj[v.index()].iter().copied().collect();
        let (mut squares_total, mut potential) = (0usize, 0usize);

        for (pos, &u) in nbrs.iter().enumerate() {
            for &w in &nbrs[pos + 1..] {
                let squares = adj[u.index()]
                    .intersection(&adj[w.index()])
                    .filter(|&&x| x != v)
                    .count();
                squares_total += squares;

                let mut degm = squares + 1;
                if adj[u.index()].contains(&w) {
                    degm += 1;
                }
                let free_u = adj[u.index()].len().saturating_sub(degm);
                let free_w = adj[w.index()].len().saturating_sub(degm);
                potential += free_u * free_w + squares;
            }
        }

        let score = if potential > 0 {
            squares_total as f64 / potential as f64
        } else {
            squares_total as f64
        };
        scores.insert(key.clone(), score);
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{complete_graph, cycle_graph, path_graph},
        graph::{attrs, AttrValue},
        DiGraph, Graph,
    };

    fn k5_without_edge() -> Graph<usize> {
        let mut graph: Graph<usize> = complete_graph(5);
        graph.remove_edge(&1, &2).unwrap();
        graph
    }

    fn by_node<T: Copy>(scores: &HashMap<usize, T>, n: usize) -> Vec<T> {
        (0..n).map(|node| scores[&node]).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_triangles() {
        let empty: Graph<usize> = Graph::new();
        assert!(triangles(&empty, None).unwrap().is_empty());

        let path: Graph<usize> = path_graph(10);
        assert!(triangles(&path, None).unwrap().values().all(|&t| t == 0));

        let complete: Graph<usize> = complete_graph(5);
        let counts = triangles(&complete, None).unwrap();
        assert_eq!(by_node(&counts, 5), vec![6; 5]);
        assert_eq!(counts.values().sum::<usize>() / 3, 10);
        assert_eq!(triangles(&complete, Some(&[1])).unwrap()[&1], 6);

        let graph = k5_without_edge();
        assert_eq!(by_node(&triangles(&graph, None).unwrap(), 5), vec![5, 3, 3, 5, 5]);
        assert_eq!(triangles(&graph, Some(&[1])).unwrap()[&1], 3);
    }

    #[test]
    fn test_triangles_ignore_selfloops() {
        let mut graph: Graph<usize> = cycle_graph(3);
        graph.add_edge(0, 0);
        assert_eq!(by_node(&triangles(&graph, None).unwrap(), 3), vec![1, 1, 1]);
        assert_eq!(clustering(&graph, None, None).unwrap()[&0], 1.0);
    }

    #[test]
    fn test_clustering() {
        let path: Graph<usize> = path_graph(10);
        assert!(clustering(&path, None, None).unwrap().values().all(|&c| c == 0.0));

        let complete: Graph<usize> = complete_graph(5);
        let scores = clustering(&complete, None, None).unwrap();
        assert!(scores.values().all(|&c| c == 1.0));
        assert_eq!(average_clustering(&complete, None, None, true).unwrap(), 1.0);

        let graph = k5_without_edge();
        let expected = [5.0 / 6.0, 1.0, 1.0, 5.0 / 6.0, 5.0 / 6.0];
        for weight in [None, Some("weight")] {
            let scores = clustering(&graph, None, weight).unwrap();
            for (node, &c) in expected.iter().enumerate() {
                assert!(close(scores[&node], c), "node {node}: {}", scores[&node]);
            }
            let subset = clustering(&graph, Some(&[1, 4]), weight).unwrap();
            assert_eq!(subset.len(), 2);
            assert!(close(subset[&1], 1.0));
            assert!(close(subset[&4], 0.8333333333333334));
        }
    }

    #[test]
    fn test_weighted_clustering() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_weighted_edges_from([(0, 1, 2.0), (1, 2, 2.0), (2, 0, 2.0), (2, 3, 4.0)], "weight");

        let scores = clustering(&graph, None, Some("weight")).unwrap();
        assert!(close(scores[&0], 0.5));
        assert!(close(scores[&2], 0.5 / 3.0));
        assert_eq!(scores[&3], 0.0);

        graph.add_edge_with(0, 1, attrs([("weight", AttrValue::from("heavy"))]));
        assert!(matches!(
            clustering(&graph, None, Some("weight")),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_average_clustering() {
        let mut graph: Graph<usize> = cycle_graph(3);
        graph.add_edge(2, 3);

        let all = average_clustering(&graph, None, None, true).unwrap();
        assert!(close(all, (1.0 + 1.0 + 1.0 / 3.0) / 4.0));
        let nonzero = average_clustering(&graph, None, None, false).unwrap();
        assert!(close(nonzero, (1.0 + 1.0 + 1.0 / 3.0) / 3.0));

        let empty: Graph<usize> = Graph::new();
        assert!(matches!(
            average_clustering(&empty, None, None, true),
            Err(Error::PointlessConcept(_))
        ));
    }

    #[test]
    fn test_transitivity() {
        let empty: Graph<usize> = Graph::new();
        assert_eq!(transitivity(&empty).unwrap(), 0.0);
        assert_eq!(transitivity(&path_graph::<Graph<usize>>(10)).unwrap(), 0.0);
        assert_eq!(transitivity(&complete_graph::<Graph<usize>>(5)).unwrap(), 1.0);
        assert_eq!(transitivity(&k5_without_edge()).unwrap(), 0.875);
    }

    #[test]
    fn test_square_clustering() {
        let path: Graph<usize> = path_graph(10);
        assert!(square_clustering(&path, None).unwrap().values().all(|&c| c == 0.0));

        let complete: Graph<usize> = complete_graph(5);
        assert!(square_clustering(&complete, None).unwrap().values().all(|&c| c == 1.0));
    }

    #[test]
    fn test_square_clustering_lind() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edges_from([
            (1, 2),
            (1, 3),
            (1, 6),
            (1, 7),
            (2, 4),
            (2, 5),
            (3, 4),
            (3, 5),
            (6, 7),
            (7, 8),
            (6, 8),
            (7, 9),
            (7, 10),
            (6, 11),
            (6, 12),
            (2, 13),
            (2, 14),
            (3, 15),
            (3, 16),
        ]);
        assert!(close(square_clustering(&graph, Some(&[1])).unwrap()[&1], 3.0 / 75.0));

        let squares = graph.subgraph(&[1, 2, 3, 4, 5, 13, 14, 15, 16]);
        assert!(close(square_clustering(&squares, Some(&[1])).unwrap()[&1], 2.0 / 6.0));

        let triangles = graph.subgraph(&[1, 6, 7, 8, 9, 10, 11, 12]);
        assert!(close(square_clustering(&triangles, Some(&[1])).unwrap()[&1], 1.0 / 5.0));
    }

    #[test]
    fn test_rejects_directed() {
        let graph: DiGraph<usize> = cycle_graph(3);
        assert!(matches!(triangles(&graph, None), Err(Error::NotImplemented(_))));
        assert!(matches!(clustering(&graph, None, None), Err(Error::NotImplemented(_))));
        assert!(matches!(transitivity(&graph), Err(Error::NotImplemented(_))));
        assert!(matches!(square_clustering(&graph, None), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn test_unknown_node() {
        let graph: Graph<usize> = path_graph(3);
        assert!(matches!(triangles(&graph, Some(&[7])), Err(Error::NodeNotFound(_))));
    }
}
