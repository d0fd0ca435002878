//! Directed acyclic graph analysis: topological sorting, acyclicity and aperiodicity.
//!
//! Every operation here is defined for directed graphs only and returns
//! [`Error::NotImplemented`](crate::Error::NotImplemented) for undirected ones.
//!
//! A cycle found while sorting is reported as [`Error::Unfeasible`]; it is the only
//! error [`is_directed_acyclic_graph`] converts into a boolean.

use tracing::debug;

use crate::{
    algorithms::lookup,
    graph::{NodeId, Successors},
    Error, Result,
};

fn require_directed<G: Successors>(graph: &G, operation: &str) -> Result<()> {
    if graph.is_directed() {
        Ok(())
    } else {
        Err(not_implemented!("{} not defined on undirected graphs.", operation))
    }
}

fn start_nodes<G: Successors>(graph: &G, nbunch: Option<&[G::Node]>) -> Result<Vec<NodeId>> {
    match nbunch {
        None => Ok(graph.node_ids().collect()),
        Some(nodes) => nodes.iter().map(|n| lookup(graph, n)).collect(),
    }
}

fn to_keys<G: Successors>(graph: &G, ids: impl IntoIterator<Item = NodeId>) -> Vec<G::Node> {
    ids.into_iter()
        .filter_map(|id| graph.node_key(id).cloned())
        .collect()
}

/// Iterative depth-first sort returning ids in post-order (finished first).
fn postorder<G: Successors>(graph: &G, starts: &[NodeId]) -> Result<Vec<NodeId>> {
    let bound = graph.node_bound();
    let mut seen = vec![false; bound];
    let mut explored = vec![false; bound];
    let mut finished = Vec::with_capacity(graph.node_count());

    for &v in starts {
        if explored[v.index()] {
            continue;
        }

        let mut fringe = vec![v];
        while let Some(&w) = fringe.last() {
            if explored[w.index()] {
                fringe.pop();
                continue;
            }
            seen[w.index()] = true;

            let mut fresh = Vec::new();
            for n in graph.successors(w) {
                if explored[n.index()] {
                    continue;
                }
                if seen[n.index()] {
                    debug!(node = %n, "cycle detected during topological sort");
                    return Err(unfeasible!("Graph contains a cycle."));
                }
                fresh.push(n);
            }

            if fresh.is_empty() {
                explored[w.index()] = true;
                finished.push(w);
            } else {
                fringe.extend(fresh);
            }
        }
    }
    Ok(finished)
}

/// Returns the nodes of a directed acyclic graph in topological order.
///
/// The sort is a depth-first search driven by an explicit stack; a node is placed in
/// front of everything finished before it. With `nbunch`, the search starts from the
/// listed nodes in order and only covers what they reach.
///
/// # Errors
///
/// - [`Error::NotImplemented`] for undirected graphs
/// - [`Error::NodeNotFound`] if `nbunch` names a node that is not in the graph
/// - [`Error::Unfeasible`] if the graph contains a cycle
///
/// # Examples
///
/// ```rust
/// use netgraph::{algorithms::dag::topological_sort, DiGraph};
///
/// let mut graph: DiGraph<u32> = DiGraph::new();
/// graph.add_edges_from([(1, 2), (1, 3), (2, 3)]);
/// assert_eq!(topological_sort(&graph, None)?, vec![1, 2, 3]);
/// # Ok::<(), netgraph::Error>(())
/// ```
pub fn topological_sort<G: Successors>(graph: &G, nbunch: Option<&[G::Node]>) -> Result<Vec<G::Node>> {
    require_directed(graph, "Topological sort")?;
    let starts = start_nodes(graph, nbunch)?;
    let finished = postorder(graph, &starts)?;
    Ok(to_keys(graph, finished.into_iter().rev()))
}

/// Returns the nodes in reverse topological order: every node after all of its
/// successors.
///
/// # Errors
///
/// Same as [`topological_sort`].
pub fn topological_sort_reversed<G: Successors>(
    graph: &G,
    nbunch: Option<&[G::Node]>,
) -> Result<Vec<G::Node>> {
    require_directed(graph, "Topological sort")?;
    let starts = start_nodes(graph, nbunch)?;
    let finished = postorder(graph, &starts)?;
    Ok(to_keys(graph, finished))
}

/// Recursive counterpart of [`topological_sort`].
///
/// Any valid order may differ from the iterative one on graphs with several valid
/// orders. Recursion depth grows with the longest path.
///
/// # Errors
///
/// Same as [`topological_sort`].
pub fn topological_sort_recursive<G: Successors>(
    graph: &G,
    nbunch: Option<&[G::Node]>,
) -> Result<Vec<G::Node>> {
    require_directed(graph, "Topological sort")?;
    let starts = start_nodes(graph, nbunch)?;

    let bound = graph.node_bound();
    let mut seen = vec![false; bound];
    let mut explored = vec![false; bound];
    let mut finished = Vec::with_capacity(graph.node_count());
    for v in starts {
        if !explored[v.index()] {
            visit(graph, v, &mut seen, &mut explored, &mut finished)?;
        }
    }
    Ok(to_keys(graph, finished.into_iter().rev()))
}

fn visit<G: Successors>(
    graph: &G,
    v: NodeId,
    seen: &mut [bool],
    explored: &mut [bool],
    finished: &mut Vec<NodeId>,
) -> Result<()> {
    seen[v.index()] = true;
    for w in graph.successors(v) {
        if !seen[w.index()] {
            visit(graph, w, seen, explored, finished)?;
        } else if !explored[w.index()] {
            return Err(unfeasible!("Graph contains a cycle."));
        }
    }
    explored[v.index()] = true;
    finished.push(v);
    Ok(())
}

/// Returns `true` if the graph is a directed acyclic graph.
///
/// Runs [`topological_sort`] and maps only its cycle signal to `false`.
///
/// # Errors
///
/// Propagates every other error of [`topological_sort`], including
/// [`Error::NotImplemented`] for undirected graphs.
pub fn is_directed_acyclic_graph<G: Successors>(graph: &G) -> Result<bool> {
    match topological_sort(graph, None) {
        Ok(_) => Ok(true),
        Err(err) if err.is_unfeasible() => Ok(false),
        Err(err) => Err(err),
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns `true` if the greatest common divisor of the graph's cycle lengths is 1.
///
/// The graph is layered by a BFS from its first node; every non-tree edge `u -> v`
/// contributes `level(u) - level(v) + 1` to the gcd. Nodes the BFS does not reach are
/// examined the same way as an induced subgraph, and all parts must be aperiodic.
///
/// # Errors
///
/// - [`Error::NotImplemented`] for undirected graphs
/// - [`Error::PointlessConcept`] for a graph without nodes
pub fn is_aperiodic<G: Successors>(graph: &G) -> Result<bool> {
    require_directed(graph, "is_aperiodic")?;
    if graph.node_count() == 0 {
        return Err(Error::PointlessConcept("Graph has no nodes.".to_string()));
    }

    let bound = graph.node_bound();
    let mut active = vec![false; bound];
    for id in graph.node_ids() {
        active[id.index()] = true;
    }

    let mut parts = 0usize;
    while let Some(start) = graph.node_ids().find(|id| active[id.index()]) {
        parts += 1;
        let mut levels: Vec<Option<u64>> = vec![None; bound];
        levels[start.index()] = Some(0);
        let mut this_level = vec![start];
        let mut divisor = 0u64;
        let mut depth = 1u64;

        while !this_level.is_empty() {
            let mut next_level = Vec::new();
            for &u in &this_level {
                let level_u = levels[u.index()].unwrap_or(0);
                for v in graph.successors(u) {
                    if !active[v.index()] {
                        continue;
                    }
                    match levels[v.index()] {
                        Some(level_v) => {
                            let span = (level_u + 1).abs_diff(level_v);
                            divisor = gcd(divisor, span);
                        }
                        None => {
                            levels[v.index()] = Some(depth);
                            next_level.push(v);
                        }
                    }
                }
            }
            this_level = next_level;
            depth += 1;
        }

        if divisor != 1 {
            debug!(parts, divisor, "graph is periodic");
            return Ok(false);
        }
        for (flag, level) in active.iter_mut().zip(&levels) {
            if level.is_some() {
                *flag = false;
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{convert::from_adjacency, DiGraph, Graph},
        test::directed_cycle,
    };

    fn digraph(edges: &[(u32, u32)]) -> DiGraph<u32> {
        let mut graph = DiGraph::new();
        graph.add_edges_from(edges.iter().copied());
        graph
    }

    fn cycle(nodes: &[u32]) -> Vec<(u32, u32)> {
        directed_cycle(nodes).edges(None)
    }

    #[test]
    fn test_simple_sort() {
        let graph = digraph(&[(1, 2), (1, 3), (2, 3)]);
        assert_eq!(topological_sort(&graph, None).unwrap(), vec![1, 2, 3]);
        assert_eq!(topological_sort_recursive(&graph, None).unwrap(), vec![1, 2, 3]);
        assert_eq!(topological_sort_reversed(&graph, None).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_cycle_and_recovery() {
        let mut graph: DiGraph<u32> = from_adjacency([
            (1, vec![2]),
            (2, vec![3]),
            (3, vec![4]),
            (4, vec![5]),
            (5, vec![1]),
            (11, vec![12]),
            (12, vec![13]),
            (13, vec![14]),
            (14, vec![15]),
        ]);

        assert!(topological_sort(&graph, None).unwrap_err().is_unfeasible());
        assert!(topological_sort_recursive(&graph, None).unwrap_err().is_unfeasible());
        assert!(!is_directed_acyclic_graph(&graph).unwrap());

        graph.remove_edge(&1, &2).unwrap();
        let expected = vec![11, 12, 13, 14, 15, 2, 3, 4, 5, 1];
        assert_eq!(topological_sort(&graph, None).unwrap(), expected);
        assert_eq!(topological_sort_recursive(&graph, None).unwrap(), expected);
        assert!(is_directed_acyclic_graph(&graph).unwrap());
    }

    #[test]
    fn test_selfloop_is_a_cycle() {
        let graph = digraph(&[(1, 2), (2, 2)]);
        assert!(!is_directed_acyclic_graph(&graph).unwrap());
        assert!(topological_sort_recursive(&graph, None).is_err());
    }

    #[test]
    fn test_nbunch() {
        let graph = digraph(&[(1, 2), (2, 3), (1, 4), (1, 5), (2, 6)]);
        assert_eq!(topological_sort(&graph, None).unwrap(), vec![1, 2, 3, 6, 4, 5]);
        assert_eq!(
            topological_sort_recursive(&graph, None).unwrap(),
            vec![1, 5, 4, 2, 6, 3]
        );
        assert_eq!(topological_sort(&graph, Some(&[1][..])).unwrap(), vec![1, 2, 3, 6, 4, 5]);
        assert_eq!(topological_sort(&graph, Some(&[5][..])).unwrap(), vec![5]);
        assert_eq!(topological_sort_recursive(&graph, Some(&[5][..])).unwrap(), vec![5]);
        assert!(matches!(
            topological_sort(&graph, Some(&[42][..])),
            Err(Error::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_undirected_is_rejected() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge(0, 1);
        assert!(matches!(topological_sort(&graph, None), Err(Error::NotImplemented(_))));
        assert!(matches!(
            topological_sort_recursive(&graph, None),
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(
            is_directed_acyclic_graph(&graph),
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(is_aperiodic(&graph), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn test_aperiodic() {
        assert!(!is_aperiodic(&directed_cycle(&[1, 2, 3, 4])).unwrap());

        let mut edges = cycle(&[1, 2, 3, 4]);
        edges.extend(cycle(&[3, 4, 5, 6, 7]));
        assert!(is_aperiodic(&digraph(&edges)).unwrap());

        let mut edges = cycle(&[1, 2, 3, 4]);
        edges.extend(cycle(&[3, 4, 5, 6]));
        assert!(!is_aperiodic(&digraph(&edges)).unwrap());

        let mut edges = cycle(&[1, 2, 3, 4]);
        edges.push((1, 3));
        assert!(is_aperiodic(&digraph(&edges)).unwrap());

        let mut edges = cycle(&[1, 2, 3, 4]);
        edges.push((1, 1));
        assert!(is_aperiodic(&digraph(&edges)).unwrap());
    }

    #[test]
    fn test_aperiodic_tree_and_parts() {
        assert!(!is_aperiodic(&digraph(&[(0, 1), (0, 2), (1, 3)])).unwrap());

        let mut edges = cycle(&[1, 2, 3]);
        edges.extend(cycle(&[10, 11]));
        edges.push((10, 10));
        let graph = digraph(&edges);
        assert!(!is_aperiodic(&graph).unwrap());

        let mut edges = vec![(1, 1)];
        edges.extend(cycle(&[10, 11]));
        edges.push((10, 10));
        assert!(is_aperiodic(&digraph(&edges)).unwrap());
    }

    #[test]
    fn test_aperiodic_empty() {
        let graph: DiGraph<u32> = DiGraph::new();
        assert!(matches!(is_aperiodic(&graph), Err(Error::PointlessConcept(_))));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(0, 4), 4);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
    }
}
