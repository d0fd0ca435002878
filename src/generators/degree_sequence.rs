use tracing::debug;

use crate::{
    algorithms::graphical::is_valid_degree_sequence_havel_hakimi,
    generators::{empty_graph, set_name},
    graph::{Attrs, Build},
    Result,
};

/// Returns a simple graph realizing `sequence`, built with the Havel–Hakimi procedure.
///
/// Node `i` gets degree `sequence[i]`. The node with the most remaining stubs is
/// connected to the nodes with the next most stubs, ties broken by the larger label.
///
/// # Errors
///
/// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the sequence is not
///   graphical
/// - [`Error::NotImplemented`](crate::Error::NotImplemented) for directed or multigraph
///   targets
///
/// # Examples
///
/// ```rust
/// use netgraph::{generators::havel_hakimi_graph, Graph};
///
/// let graph: Graph<usize> = havel_hakimi_graph(&[2, 2, 2])?;
/// assert_eq!(graph.number_of_edges(), 3);
/// assert!(havel_hakimi_graph::<Graph<usize>>(&[3, 1]).is_err());
/// # Ok::<(), netgraph::Error>(())
/// ```
pub fn havel_hakimi_graph<G: Build<Node = usize>>(sequence: &[i64]) -> Result<G> {
    if !is_valid_degree_sequence_havel_hakimi(sequence) {
        return Err(invalid_argument!("Invalid degree sequence {:?}", sequence));
    }

    let mut graph: G = empty_graph(sequence.len());
    if graph.is_directed() {
        return Err(not_implemented!("Directed Graph not supported"));
    }
    if graph.is_multigraph() {
        return Err(not_implemented!("Havel-Hakimi requires simple graph"));
    }

    let mut stubs: Vec<(i64, usize)> = sequence.iter().copied().zip(0..).collect();
    let mut edges = 0usize;
    loop {
        stubs.sort_unstable();
        let Some((degree, node)) = stubs.pop() else {
            break;
        };
        if degree == 0 {
            break;
        }
        // A valid sequence always has enough stubs left
        let len = stubs.len();
        let start = len.saturating_sub(degree as usize);
        for (remaining, target) in &mut stubs[start..] {
            graph.add_edge_with(node, *target, Attrs::new());
            *remaining -= 1;
            edges += 1;
        }
    }

    let nodes = graph.node_count();
    debug!(nodes, edges, "havel-hakimi graph built");
    set_name(&mut graph, format!("havel_hakimi_graph {nodes} nodes {edges} edges"));
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Graph};

    #[test]
    fn test_realizes_sequence() {
        let sequence = [3, 4, 3, 4, 2, 4, 2, 1, 1, 1, 1];
        let graph: Graph<usize> = havel_hakimi_graph(&sequence).unwrap();
        for (node, &expected) in sequence.iter().enumerate() {
            assert_eq!(graph.degree(&node).unwrap() as i64, expected);
        }
        assert_eq!(graph.name(), "havel_hakimi_graph 11 nodes 13 edges");
    }

    #[test]
    fn test_trivial_sequences() {
        let graph: Graph<usize> = havel_hakimi_graph(&[]).unwrap();
        assert_eq!(graph.number_of_nodes(), 0);

        let graph: Graph<usize> = havel_hakimi_graph(&[0, 0]).unwrap();
        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(graph.number_of_edges(), 0);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            havel_hakimi_graph::<Graph<usize>>(&[3, 3, 1, 1]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            havel_hakimi_graph::<crate::DiGraph<usize>>(&[1, 1]),
            Err(Error::NotImplemented(_))
        ));
    }

    #[test]
    fn test_rejects_huge_degrees() {
        assert!(matches!(
            havel_hakimi_graph::<Graph<usize>>(&[i64::MAX, i64::MAX, 2]),
            Err(Error::InvalidArgument(_))
        ));
    }
}
