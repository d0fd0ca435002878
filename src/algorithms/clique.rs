//! Maximal clique enumeration (Bron–Kerbosch with Tomita pivoting).
//!
//! [`find_cliques`] is the production form: a lazy iterator driven by an explicit
//! frame stack, so neither memory for the full result nor call-stack depth grows with
//! the graph. [`find_cliques_recursive`] computes the same set of cliques with the
//! textbook recursion and is kept as a cross-check.
//!
//! Self-loops never contribute to a clique. The algorithms read neighbors through
//! [`Successors`]; they are meant for undirected graphs.
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{algorithms::clique::{find_cliques, graph_clique_number}, Graph};
//!
//! let mut graph: Graph<u32> = Graph::new();
//! graph.add_edges_from([(1, 2), (2, 3), (3, 1), (3, 4)]);
//!
//! let mut cliques: Vec<Vec<u32>> = find_cliques(&graph)
//!     .map(|mut clique| {
//!         clique.sort();
//!         clique
//!     })
//!     .collect();
//! cliques.sort();
//!
//! assert_eq!(cliques, vec![vec![1, 2, 3], vec![3, 4]]);
//! assert_eq!(graph_clique_number(&graph, None), 3);
//! ```

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::{
    algorithms::lookup_all,
    graph::{NodeId, Successors},
    Result,
};

pub(crate) type IdSet = BTreeSet<NodeId>;

/// Neighbor sets without self-loops, indexed by [`NodeId::index`].
pub(crate) fn loopless_adjacency<G: Successors>(graph: &G) -> Vec<IdSet> {
    let mut adj = vec![IdSet::new(); graph.node_bound()];
    for id in graph.node_ids() {
        adj[id.index()] = graph.successors(id).filter(|&nbr| nbr != id).collect();
    }
    adj
}

/// Picks the member of `subgraph` with the most neighbors among `candidates`.
///
/// The first maximum in id order wins.
fn pivot(adj: &[IdSet], subgraph: &IdSet, candidates: &IdSet) -> Option<NodeId> {
    let mut best: Option<(NodeId, usize)> = None;
    for &u in subgraph {
        let score = candidates.intersection(&adj[u.index()]).count();
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((u, score));
        }
    }
    best.map(|(u, _)| u)
}

/// Candidates not adjacent to the pivot, in ascending id order.
fn extension(adj: &[IdSet], subgraph: &IdSet, candidates: &IdSet) -> Vec<NodeId> {
    match pivot(adj, subgraph, candidates) {
        Some(u) => candidates.difference(&adj[u.index()]).copied().collect(),
        None => candidates.iter().copied().collect(),
    }
}

struct Frame {
    subgraph: IdSet,
    candidates: IdSet,
    ext: Vec<NodeId>,
}

/// Lazy iterator over the maximal cliques of a graph, created by [`find_cliques`].
///
/// Each item lists the clique members in the order they were added. Cliques come out in
/// a deterministic order for a given graph, but callers should not rely on it.
pub struct FindCliques<'g, G: Successors> {
    graph: &'g G,
    adj: Vec<IdSet>,
    subgraph: IdSet,
    candidates: IdSet,
    // Remaining branches of the current level, consumed from the back
    ext: Vec<NodeId>,
    clique: Vec<NodeId>,
    stack: Vec<Frame>,
}

impl<'g, G: Successors> FindCliques<'g, G> {
    fn new(graph: &'g G) -> Self {
        let adj = loopless_adjacency(graph);
        let subgraph: IdSet = graph.node_ids().collect();
        let candidates = subgraph.clone();
        let mut ext = extension(&adj, &subgraph, &candidates);
        ext.reverse();
        debug!(nodes = subgraph.len(), "enumerating maximal cliques");

        FindCliques {
            graph,
            adj,
            subgraph,
            candidates,
            ext,
            clique: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn emit(&self, extra: Option<NodeId>) -> Vec<G::Node> {
        let clique: Vec<G::Node> = self
            .clique
            .iter()
            .chain(extra.as_ref())
            .filter_map(|&id| self.graph.node_key(id).cloned())
            .collect();
        trace!(size = clique.len(), "found maximal clique");
        clique
    }
}

impl<G: Successors> Iterator for FindCliques<'_, G> {
    type Item = Vec<G::Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(q) = self.ext.pop() else {
                let frame = self.stack.pop()?;
                self.subgraph = frame.subgraph;
                self.candidates = frame.candidates;
                self.ext = frame.ext;
                continue;
            };

            self.candidates.remove(&q);
            self.clique.truncate(self.stack.len());
            self.clique.push(q);

            let adj_q = &self.adj[q.index()];
            let subgraph_q: IdSet = self.subgraph.intersection(adj_q).copied().collect();
            if subgraph_q.is_empty() {
                return Some(self.emit(None));
            }

            let candidates_q: IdSet = self.candidates.intersection(adj_q).copied().collect();
            if subgraph_q.len() == 1 && candidates_q.len() == 1 {
                // The lone remaining node closes the clique
                return Some(self.emit(candidates_q.first().copied()));
            }
            if !candidates_q.is_empty() {
                let mut ext = extension(&self.adj, &subgraph_q, &candidates_q);
                ext.reverse();
                self.stack.push(Frame {
                    subgraph: std::mem::replace(&mut self.subgraph, subgraph_q),
                    candidates: std::mem::replace(&mut self.candidates, candidates_q),
                    ext: std::mem::replace(&mut self.ext, ext),
                });
            }
        }
    }
}

/// Returns a lazy iterator over all maximal cliques of `graph`.
///
/// An empty graph yields nothing.
pub fn find_cliques<G: Successors>(graph: &G) -> FindCliques<'_, G> {
    FindCliques::new(graph)
}

/// Returns all maximal cliques of `graph`, computed recursively.
///
/// Produces the same set of cliques as [`find_cliques`]; recursion depth grows with the
/// size of the largest clique.
pub fn find_cliques_recursive<G: Successors>(graph: &G) -> Vec<Vec<G::Node>> {
    if graph.node_count() == 0 {
        return Vec::new();
    }

    let adj = loopless_adjacency(graph);
    let all: IdSet = graph.node_ids().collect();
    let mut found = Vec::new();
    let mut clique = Vec::new();
    expand(&adj, &all, all.clone(), &mut clique, &mut found);

    found
        .into_iter()
        .map(|ids| {
            ids.into_iter()
                .filter_map(|id| graph.node_key(id).cloned())
                .collect()
        })
        .collect()
}

fn expand(
    adj: &[IdSet],
    subgraph: &IdSet,
    mut candidates: IdSet,
    clique: &mut Vec<NodeId>,
    found: &mut Vec<Vec<NodeId>>,
) {
    for q in extension(adj, subgraph, &candidates) {
        candidates.remove(&q);
        clique.push(q);

        let adj_q = &adj[q.index()];
        let subgraph_q: IdSet = subgraph.intersection(adj_q).copied().collect();
        if subgraph_q.is_empty() {
            found.push(clique.clone());
        } else {
            let candidates_q: IdSet = candidates.intersection(adj_q).copied().collect();
            if !candidates_q.is_empty() {
                expand(adj, &subgraph_q, candidates_q, clique, found);
            }
        }

        clique.pop();
    }
}

/// Returns the size of the largest maximal clique, `0` for an empty graph.
///
/// Pass previously computed `cliques` to avoid enumerating them again.
pub fn graph_clique_number<G: Successors>(graph: &G, cliques: Option<&[Vec<G::Node>]>) -> usize {
    match cliques {
        Some(cliques) => cliques.iter().map(Vec::len).max().unwrap_or(0),
        None => find_cliques(graph).map(|clique| clique.len()).max().unwrap_or(0),
    }
}

/// Returns the number of maximal cliques.
pub fn graph_number_of_cliques<G: Successors>(
    graph: &G,
    cliques: Option<&[Vec<G::Node>]>,
) -> usize {
    match cliques {
        Some(cliques) => cliques.len(),
        None => find_cliques(graph).count(),
    }
}

/// Returns, for each node of `nodes` (or of the graph), the number of maximal cliques
/// containing it.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`](crate::Error::NodeNotFound) if a listed node is not
/// in the graph.
pub fn number_of_cliques<G: Successors>(
    graph: &G,
    nodes: Option<&[G::Node]>,
    cliques: Option<&[Vec<G::Node>]>,
) -> Result<HashMap<G::Node, usize>> {
    let ids = lookup_all(graph, nodes)?;

    let mut membership = vec![0usize; graph.node_bound()];
    let mut count_clique = |clique: &[G::Node]| {
        for id in clique.iter().filter_map(|n| graph.node_id(n)) {
            membership[id.index()] += 1;
        }
    };
    match cliques {
        Some(cliques) => cliques.iter().for_each(|clique| count_clique(clique.as_slice())),
        None => find_cliques(graph).for_each(|clique| count_clique(clique.as_slice())),
    }

    Ok(ids
        .into_iter()
        .filter_map(|id| Some((graph.node_key(id)?.clone(), membership[id.index()])))
        .collect())
}

/// Returns the number of maximal cliques containing `node`.
///
/// A node outside the graph belongs to no clique.
pub fn node_number_of_cliques<G: Successors>(
    graph: &G,
    node: &G::Node,
    cliques: Option<&[Vec<G::Node>]>,
) -> usize {
    match cliques {
        Some(cliques) => cliques.iter().filter(|clique| clique.contains(node)).count(),
        None => find_cliques(graph)
            .filter(|clique| clique.contains(node))
            .count(),
    }
}
