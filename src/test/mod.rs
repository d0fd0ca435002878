//! Graph fixtures shared by the unit tests.

use crate::{
    generators::{complete_graph, havel_hakimi_graph},
    relabel::{convert_node_labels_to_integers, relabel_nodes, LabelOrdering},
    DiGraph, Graph,
};

/// Degree sequence whose Havel–Hakimi realization has five maximal cliques.
pub const CLIQUE_DEGREES: [i64; 11] = [3, 4, 3, 4, 2, 4, 2, 1, 1, 1, 1];

/// Maximal cliques of [`havel_hakimi_fixture`], each sorted.
pub const HAVEL_HAKIMI_CLIQUES: [&[usize]; 5] = [&[1, 2, 3, 6], &[2, 4, 6], &[4, 5, 7], &[8, 9], &[10, 11]];

/// Havel–Hakimi realization of [`CLIQUE_DEGREES`], labeled `1..=11`.
pub fn havel_hakimi_fixture() -> Graph<usize> {
    let graph: Graph<usize> = havel_hakimi_graph(&CLIQUE_DEGREES).unwrap();
    let (numbered, _) = convert_node_labels_to_integers(&graph, 1, LabelOrdering::Default).unwrap();
    numbered
}

/// `K_6` on `1..=6` with five edges removed; its cliques are `{1,2}`, `{1,4,5,6}`,
/// `{2,3}` and `{3,4,6}`.
pub fn sparse_k6() -> Graph<usize> {
    let complete: Graph<usize> = complete_graph(6);
    let mut graph: Graph<usize> = relabel_nodes(&complete, |n| n + 1);
    graph.remove_edges_from([(2, 6), (2, 5), (2, 4), (1, 3), (5, 3)]);
    graph
}

/// Two triangles sharing node 2.
pub fn bowtie() -> Graph<u32> {
    let mut graph = Graph::new();
    graph.add_edges_from([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
    graph
}

/// The paw: a triangle `A-B-C` with a pendant `D` on `C`.
pub fn paw() -> Graph<&'static str> {
    let mut graph = Graph::with_name("paw");
    graph.add_edges_from([("A", "B"), ("A", "C"), ("B", "C"), ("C", "D")]);
    graph
}

/// Directed cycle through `nodes` in order.
pub fn directed_cycle(nodes: &[u32]) -> DiGraph<u32> {
    let mut graph = DiGraph::new();
    graph.add_edges_from(nodes.iter().zip(nodes.iter().cycle().skip(1)).map(|(&u, &v)| (u, v)));
    graph
}

/// Sorts every clique and then the list of cliques.
pub fn normalized<N: Ord>(cliques: impl IntoIterator<Item = Vec<N>>) -> Vec<Vec<N>> {
    let mut cliques: Vec<Vec<N>> = cliques
        .into_iter()
        .map(|mut clique| {
            clique.sort_unstable();
            clique
        })
        .collect();
    cliques.sort();
    cliques
}
