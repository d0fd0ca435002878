//! Greedy maximal matching.

use crate::graph::Successors;

/// Returns a maximal matching, as edges in edge iteration order.
///
/// Edges are scanned once; an edge joins the matching when neither endpoint is covered
/// yet. The result is maximal (no edge can be added) but not necessarily maximum.
///
/// # Examples
///
/// ```rust
/// use netgraph::{algorithms::matching::maximal_matching, generators::path_graph, Graph};
///
/// let graph: Graph<usize> = path_graph(4);
/// assert_eq!(maximal_matching(&graph), vec![(0, 1), (2, 3)]);
/// ```
#[must_use]
pub fn maximal_matching<G: Successors>(graph: &G) -> Vec<(G::Node, G::Node)> {
    let mut covered = vec![false; graph.node_bound()];
    let mut matching = Vec::new();
    for (u, v) in graph.edge_ids() {
        if covered[u.index()] || covered[v.index()] {
            continue;
        }
        if let (Some(lu), Some(lv)) = (graph.node_key(u), graph.node_key(v)) {
            covered[u.index()] = true;
            covered[v.index()] = true;
            matching.push((lu.clone(), lv.clone()));
        }
    }
    matching
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        generators::{complete_graph, cycle_graph},
        Graph,
    };

    fn assert_maximal(graph: &Graph<usize>, matching: &[(usize, usize)]) {
        let mut covered = HashSet::new();
        for &(u, v) in matching {
            assert!(graph.has_edge(&u, &v));
            assert!(covered.insert(u) && covered.insert(v), "{u}-{v} shares an endpoint");
        }
        for (u, v) in graph.edges(None) {
            assert!(covered.contains(&u) || covered.contains(&v), "{u}-{v} could be added");
        }
    }

    #[test]
    fn test_maximal_matching() {
        let mut graph: Graph<usize> = Graph::new();
        graph.add_edges_from([(1, 2), (1, 5), (2, 3), (2, 5), (3, 4), (3, 6), (5, 6)]);
        let matching = maximal_matching(&graph);
        assert_maximal(&graph, &matching);
        assert_eq!(matching, vec![(1, 2), (5, 6), (3, 4)]);
    }

    #[test]
    fn test_complete_and_cycle() {
        for n in [0, 1, 4, 7] {
            let complete: Graph<usize> = complete_graph(n);
            let matching = maximal_matching(&complete);
            assert_maximal(&complete, &matching);
            assert_eq!(matching.len(), n / 2);

            let cycle: Graph<usize> = cycle_graph(n);
            assert_maximal(&cycle, &maximal_matching(&cycle));
        }
    }
}
