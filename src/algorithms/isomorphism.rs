//! Cheap necessary conditions for graph isomorphism.
//!
//! Each test compares a sorted multiset of per-node invariants. A `false` answer proves
//! the graphs are not isomorphic; `true` only means the invariants agree. The two graphs
//! may have different node types.

use tracing::trace;

use crate::{
    algorithms::{clique::number_of_cliques, cluster::triangles},
    graph::{functions::degree_of, Predecessors, Successors},
    Result,
};

fn sorted_degrees<G: Successors + Predecessors>(graph: &G) -> Vec<usize> {
    let mut degrees: Vec<usize> = graph.node_ids().map(|id| degree_of(graph, id)).collect();
    degrees.sort_unstable();
    degrees
}

// Per-node (degree, triangles[, cliques]) tuples, sorted.
fn local_profile<G: Successors + Predecessors>(graph: &G, with_cliques: bool) -> Result<Vec<Vec<usize>>> {
    let tri = triangles(graph, None)?;
    let cliques = if with_cliques {
        Some(number_of_cliques(graph, None, None)?)
    } else {
        None
    };

    let mut profile = Vec::with_capacity(graph.node_count());
    for id in graph.node_ids() {
        let Some(key) = graph.node_key(id) else {
            continue;
        };
        let mut row = vec![degree_of(graph, id), tri.get(key).copied().unwrap_or(0)];
        if let Some(cliques) = &cliques {
            row.push(cliques.get(key).copied().unwrap_or(0));
        }
        profile.push(row);
    }
    profile.sort_unstable();
    Ok(profile)
}

/// Returns `false` if the graphs are certainly not isomorphic.
///
/// Compares order, then the sorted per-node triples of degree, triangle count and
/// maximal clique count.
///
/// # Errors
///
/// Returns [`Error::NotImplemented`](crate::Error::NotImplemented) for directed graphs,
/// where triangles are not defined.
///
/// # Examples
///
/// ```rust
/// use netgraph::{algorithms::isomorphism::could_be_isomorphic, Graph};
///
/// let mut g: Graph<u32> = Graph::new();
/// g.add_edges_from([(1, 2), (1, 3), (1, 5), (2, 3)]);
/// let mut h: Graph<&str> = Graph::new();
/// h.add_edges_from([("a", "b"), ("b", "c"), ("a", "c"), ("a", "e")]);
///
/// assert!(could_be_isomorphic(&g, &h)?);
/// # Ok::<(), netgraph::Error>(())
/// ```
pub fn could_be_isomorphic<G1, G2>(g1: &G1, g2: &G2) -> Result<bool>
where
    G1: Successors + Predecessors,
    G2: Successors + Predecessors,
{
    if g1.node_count() != g2.node_count() {
        return Ok(false);
    }
    let same = local_profile(g1, true)? == local_profile(g2, true)?;
    trace!(same, "compared degree, triangle and clique profiles");
    Ok(same)
}

/// Like [`could_be_isomorphic`], comparing degree and triangle count only.
///
/// # Errors
///
/// Same as [`could_be_isomorphic`].
pub fn fast_could_be_isomorphic<G1, G2>(g1: &G1, g2: &G2) -> Result<bool>
where
    G1: Successors + Predecessors,
    G2: Successors + Predecessors,
{
    if g1.node_count() != g2.node_count() {
        return Ok(false);
    }
    Ok(local_profile(g1, false)? == local_profile(g2, false)?)
}

/// Compares order and degree sequence only. Works for directed graphs too.
#[must_use]
pub fn faster_could_be_isomorphic<G1, G2>(g1: &G1, g2: &G2) -> bool
where
    G1: Successors + Predecessors,
    G2: Successors + Predecessors,
{
    g1.node_count() == g2.node_count() && sorted_degrees(g1) == sorted_degrees(g2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::cycle_graph, DiGraph, Error, Graph};

    fn fixtures() -> [Graph<u32>; 4] {
        let edge_lists: [&[(u32, u32)]; 4] = [
            &[(1, 2), (1, 3), (1, 5), (2, 3)],
            &[(10, 20), (20, 30), (10, 30), (10, 50)],
            &[(1, 2), (1, 3), (1, 5), (2, 5)],
            &[(1, 2), (1, 3), (1, 5), (2, 4)],
        ];
        edge_lists.map(|edges| {
            let mut graph = Graph::new();
            graph.add_edges_from(edges.iter().copied());
            graph
        })
    }

    #[test]
    fn test_could_be_isomorphic() {
        let [g1, g2, g3, g4] = fixtures();
        assert!(could_be_isomorphic(&g1, &g2).unwrap());
        assert!(could_be_isomorphic(&g1, &g3).unwrap());
        assert!(!could_be_isomorphic(&g1, &g4).unwrap());
        assert!(could_be_isomorphic(&g3, &g2).unwrap());
    }

    #[test]
    fn test_fast_could_be_isomorphic() {
        let [g1, g2, g3, g4] = fixtures();
        assert!(fast_could_be_isomorphic(&g3, &g2).unwrap());
        assert!(!fast_could_be_isomorphic(&g1, &g4).unwrap());
    }

    #[test]
    fn test_faster_could_be_isomorphic() {
        let [g1, g2, g3, g4] = fixtures();
        assert!(faster_could_be_isomorphic(&g3, &g2));
        assert!(faster_could_be_isomorphic(&g1, &g2));
        assert!(!faster_could_be_isomorphic(&g1, &g4));
    }

    #[test]
    fn test_directed_inputs() {
        let a: DiGraph<usize> = cycle_graph(4);
        let b: DiGraph<usize> = cycle_graph(4);
        assert!(faster_could_be_isomorphic(&a, &b));
        assert!(matches!(could_be_isomorphic(&a, &b), Err(Error::NotImplemented(_))));
    }
}
