//! Node relabeling.
//!
//! Relabeling either produces a new graph ([`relabel_nodes`], [`relabel_nodes_from_map`],
//! [`convert_node_labels_to_integers`], [`convert_node_labels_to_integers_sorted`]) or rewrites a graph in place
//! ([`relabel_nodes_in_place`]). Copies carry graph, node and edge attributes over as
//! fresh records; nothing is shared with the source graph.
//!
//! # Overlapping label sets
//!
//! In-place relabeling processes one node at a time. When a new label is also an old
//! one (`{1: 2, 2: 3}`), the nodes have to be processed so that no label is taken before
//! it has been vacated. The order is a topological sort of the mapping viewed as a
//! digraph, reversed; a cyclic mapping such as `{1: 2, 2: 1}` has no such order and is
//! rejected with [`Error::Unfeasible`].
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//! use netgraph::{relabel::relabel_nodes_in_place, Graph};
//!
//! let mut graph: Graph<u32> = Graph::new();
//! graph.add_edges_from([(1, 2), (2, 3)]);
//!
//! relabel_nodes_in_place(&mut graph, &HashMap::from([(1, 2), (2, 3), (3, 4)]))?;
//! assert_eq!(graph.edges(None), vec![(4, 3), (3, 2)]);
//! # Ok::<(), netgraph::Error>(())
//! ```

use std::{cmp::Reverse, collections::HashMap};

use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::{
    algorithms::dag::topological_sort,
    graph::{
        functions::degree_of, AttrValue, Attrs, Build, DiGraph, NodeId, NodeKey, Predecessors,
        Successors,
    },
    Error, Result,
};

/// Order in which [`convert_node_labels_to_integers`] hands out the integer labels.
///
/// `Sorted` is only available through [`convert_node_labels_to_integers_sorted`], which
/// requires ordered labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum LabelOrdering {
    /// Node iteration order.
    #[default]
    #[strum(serialize = "default")]
    Default,
    /// Ascending node value.
    #[strum(serialize = "sorted")]
    Sorted,
    /// Ascending degree, ties in node iteration order.
    #[strum(serialize = "increasing degree")]
    IncreasingDegree,
    /// Descending degree, ties in node iteration order.
    #[strum(serialize = "decreasing degree")]
    DecreasingDegree,
}

impl LabelOrdering {
    /// Parses the keyword form: `"default"`, `"sorted"`, `"increasing degree"` or
    /// `"decreasing degree"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for any other keyword.
    pub fn from_keyword(keyword: &str) -> Result<Self> {
        keyword
            .parse()
            .map_err(|_| invalid_argument!("Unknown node ordering: \"{}\"", keyword))
    }
}

/// Returns a copy of `graph` with every node relabeled by `relabel`.
///
/// The target graph type is free, so labels may change type. Nodes keep their
/// iteration order. If two nodes map to the same label they are merged, and so are
/// their edges and attribute records.
///
/// # Examples
///
/// ```rust
/// use netgraph::{relabel::relabel_nodes, Graph};
///
/// let mut graph: Graph<char> = Graph::new();
/// graph.add_edges_from([('A', 'B'), ('B', 'C')]);
///
/// let codes: Graph<u32> = relabel_nodes(&graph, |&c| c as u32);
/// assert_eq!(codes.nodes().copied().collect::<Vec<_>>(), vec![65, 66, 67]);
/// ```
pub fn relabel_nodes<S, T, F>(graph: &S, mut relabel: F) -> T
where
    S: Successors,
    T: Build,
    F: FnMut(&S::Node) -> T::Node,
{
    let mut labels = Vec::with_capacity(graph.node_bound());
    labels.resize_with(graph.node_bound(), || None);

    let mut copy = T::default();
    if let Some(record) = graph.graph_record() {
        copy.graph_attrs_mut().clone_from(record);
    }
    for id in graph.node_ids() {
        let Some(key) = graph.node_key(id) else {
            continue;
        };
        let label = relabel(key);
        let attrs = graph.node_record(id).cloned().unwrap_or_default();
        copy.add_node_with(label.clone(), attrs);
        labels[id.index()] = Some(label);
    }
    for (u, v) in graph.edge_ids() {
        let (Some(lu), Some(lv)) = (&labels[u.index()], &labels[v.index()]) else {
            continue;
        };
        let attrs = graph
            .edge_record(u, v)
            .map(|record| record.borrow().clone())
            .unwrap_or_default();
        copy.add_edge_with(lu.clone(), lv.clone(), attrs);
    }
    copy
}

/// Returns a copy of `graph` with the nodes named in `mapping` relabeled.
///
/// Nodes absent from `mapping` keep their label; mapping keys that are not in the graph
/// are ignored.
pub fn relabel_nodes_from_map<G>(graph: &G, mapping: &HashMap<G::Node, G::Node>) -> G
where
    G: Successors + Build,
{
    relabel_nodes(graph, |node: &G::Node| {
        mapping.get(node).cloned().unwrap_or_else(|| node.clone())
    })
}

/// Relabels the nodes named in `mapping` inside `graph`.
///
/// Node attributes move with the node. Edges are re-created with copies of their
/// attribute records, so edge handles obtained before the call are detached.
///
/// # Errors
///
/// - [`Error::NodeNotFound`] if a mapping key is not in the graph; the nodes processed
///   before it have already been relabeled
/// - [`Error::Unfeasible`] if old and new label sets overlap and no processing order
///   resolves the mapping
pub fn relabel_nodes_in_place<G>(graph: &mut G, mapping: &HashMap<G::Node, G::Node>) -> Result<()>
where
    G: Successors + Predecessors + Build,
{
    let overlapping = mapping.values().any(|new| mapping.contains_key(new));
    let order: Vec<G::Node> = if overlapping {
        processing_order(mapping)?
    } else {
        mapping.keys().cloned().collect()
    };
    debug!(nodes = order.len(), overlapping, "relabeling in place");

    for old in order {
        let Some(new) = mapping.get(&old) else {
            continue;
        };
        if *new == old {
            continue;
        }
        move_node(graph, &old, new.clone())?;
    }
    Ok(())
}

fn processing_order<N: NodeKey>(mapping: &HashMap<N, N>) -> Result<Vec<N>> {
    let mut labels: DiGraph<N> = DiGraph::new();
    for (old, new) in mapping {
        if old != new {
            labels.add_edge(old.clone(), new.clone());
        } else {
            labels.add_node(old.clone());
        }
    }

    match topological_sort(&labels, None) {
        Ok(mut order) => {
            order.reverse();
            Ok(order)
        }
        Err(err) if err.is_unfeasible() => Err(unfeasible!(
            "The node label sets are overlapping and no ordering can resolve the mapping. \
             Use a copying relabel instead."
        )),
        Err(err) => Err(err),
    }
}

fn move_node<G>(graph: &mut G, old: &G::Node, new: G::Node) -> Result<()>
where
    G: Successors + Predecessors + Build,
{
    let id = graph.node_id(old).ok_or_else(|| Error::node_not_found(old))?;
    let attrs = graph.node_record(id).cloned().unwrap_or_default();
    let edges = incident_edges(&*graph, id, &new);

    graph.add_node_with(new, attrs);
    graph.remove_node(old)?;
    for (u, v, attrs) in edges {
        graph.add_edge_with(u, v, attrs);
    }
    Ok(())
}

// Edges touching `id`, rewritten to use `new` in place of its label.
fn incident_edges<G>(graph: &G, id: NodeId, new: &G::Node) -> Vec<(G::Node, G::Node, Attrs)>
where
    G: Successors + Predecessors,
{
    let label = |other: NodeId| -> Option<G::Node> {
        if other == id {
            Some(new.clone())
        } else {
            graph.node_key(other).cloned()
        }
    };

    let mut edges = Vec::new();
    for (target, record) in graph.successor_edges(id) {
        if let Some(target) = label(target) {
            edges.push((new.clone(), target, record.borrow().clone()));
        }
    }
    if graph.is_directed() {
        for source in graph.predecessors(id) {
            if let (Some(label), Some(record)) = (label(source), graph.edge_record(source, id)) {
                edges.push((label, new.clone(), record.borrow().clone()));
            }
        }
    }
    edges
}

/// Returns a copy of `graph` whose nodes are the integers `first_label..`, together with
/// the mapping from old labels to new ones.
///
/// The copy is named `"(<old name>)_with_int_labels"`. Labels need not be ordered;
/// [`LabelOrdering::Sorted`] is served by [`convert_node_labels_to_integers_sorted`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for [`LabelOrdering::Sorted`].
///
/// # Examples
///
/// ```rust
/// use netgraph::{relabel::{convert_node_labels_to_integers, LabelOrdering}, Graph};
///
/// let mut graph: Graph<&str> = Graph::new();
/// graph.add_edges_from([("A", "B"), ("A", "C"), ("B", "C"), ("C", "D")]);
///
/// let (numbered, mapping): (Graph<usize>, _) =
///     convert_node_labels_to_integers(&graph, 1000, LabelOrdering::Default)?;
/// assert_eq!(numbered.nodes().copied().collect::<Vec<_>>(), vec![1000, 1001, 1002, 1003]);
/// assert_eq!(mapping["C"], 1002);
/// # Ok::<(), netgraph::Error>(())
/// ```
pub fn convert_node_labels_to_integers<S, T>(
    graph: &S,
    first_label: usize,
    ordering: LabelOrdering,
) -> Result<(T, HashMap<S::Node, usize>)>
where
    S: Successors + Predecessors,
    T: Build<Node = usize>,
{
    let mut ids: Vec<_> = graph.node_ids().collect();
    match ordering {
        LabelOrdering::Default => {}
        LabelOrdering::Sorted => {
            return Err(invalid_argument!(
                "Sorted ordering needs ordered labels, use convert_node_labels_to_integers_sorted"
            ))
        }
        LabelOrdering::IncreasingDegree => ids.sort_by_key(|&id| degree_of(graph, id)),
        LabelOrdering::DecreasingDegree => ids.sort_by_key(|&id| Reverse(degree_of(graph, id))),
    }
    Ok(number_in_order(graph, &ids, first_label))
}

/// [`convert_node_labels_to_integers`] with the labels handed out in ascending node
/// order.
///
/// ```rust
/// use netgraph::{relabel::convert_node_labels_to_integers_sorted, Graph};
///
/// let mut graph: Graph<u32> = Graph::new();
/// graph.add_edges_from([(30, 10), (10, 20)]);
///
/// let (_, mapping): (Graph<usize>, _) = convert_node_labels_to_integers_sorted(&graph, 0);
/// assert_eq!((mapping[&10], mapping[&20], mapping[&30]), (0, 1, 2));
/// ```
pub fn convert_node_labels_to_integers_sorted<S, T>(
    graph: &S,
    first_label: usize,
) -> (T, HashMap<S::Node, usize>)
where
    S: Successors,
    S::Node: Ord,
    T: Build<Node = usize>,
{
    let mut ids: Vec<_> = graph.node_ids().collect();
    ids.sort_by(|a, b| graph.node_key(*a).cmp(&graph.node_key(*b)));
    number_in_order(graph, &ids, first_label)
}

fn number_in_order<S, T>(graph: &S, ids: &[NodeId], first_label: usize) -> (T, HashMap<S::Node, usize>)
where
    S: Successors,
    T: Build<Node = usize>,
{
    let mapping: HashMap<S::Node, usize> = ids
        .iter()
        .filter_map(|&id| graph.node_key(id).cloned())
        .zip(first_label..)
        .collect();

    let mut numbered: T = relabel_nodes(graph, |node: &S::Node| mapping.get(node).copied().unwrap_or(0));
    let name = graph
        .graph_record()
        .and_then(|record| record.get("name"))
        .and_then(AttrValue::as_str)
        .unwrap_or("")
        .to_string();
    numbered
        .graph_attrs_mut()
        .insert("name".to_string(), AttrValue::Str(format!("({name})_with_int_labels")));
    (numbered, mapping)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{generators::empty_graph, test::paw, DiGraph, Graph};

    fn sorted_degrees<N: NodeKey>(degrees: Vec<(N, usize)>) -> Vec<usize> {
        let mut values: Vec<usize> = degrees.into_iter().map(|(_, d)| d).collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn test_convert_empty_graph() {
        let graph: Graph<usize> = empty_graph(0);
        for ordering in LabelOrdering::iter().filter(|o| *o != LabelOrdering::Sorted) {
            let (numbered, mapping): (Graph<usize>, _) =
                convert_node_labels_to_integers(&graph, 100, ordering).unwrap();
            assert_eq!(numbered.name(), "(empty_graph(0))_with_int_labels");
            assert_eq!(numbered.number_of_nodes(), 0);
            assert!(mapping.is_empty());
        }
        let (numbered, mapping): (Graph<usize>, _) = convert_node_labels_to_integers_sorted(&graph, 100);
        assert_eq!(numbered.name(), "(empty_graph(0))_with_int_labels");
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_convert_orderings() {
        let graph = paw();

        let (numbered, _): (Graph<usize>, _) =
            convert_node_labels_to_integers(&graph, 1000, LabelOrdering::Default).unwrap();
        assert_eq!(sorted_degrees(numbered.degrees()), sorted_degrees(graph.degrees()));
        assert_eq!(numbered.nodes().copied().collect::<Vec<_>>(), vec![1000, 1001, 1002, 1003]);
        assert_eq!(numbered.name(), "(paw)_with_int_labels");

        let (numbered, _): (Graph<usize>, _) =
            convert_node_labels_to_integers(&graph, 0, LabelOrdering::IncreasingDegree).unwrap();
        let degrees: Vec<usize> = (0..4).map(|n| numbered.degree(&n).unwrap()).collect();
        assert_eq!(degrees, vec![1, 2, 2, 3]);

        let (numbered, mapping): (Graph<usize>, _) =
            convert_node_labels_to_integers(&graph, 0, LabelOrdering::DecreasingDegree).unwrap();
        let degrees: Vec<usize> = (0..4).map(|n| numbered.degree(&n).unwrap()).collect();
        assert_eq!(degrees, vec![3, 2, 2, 1]);
        assert_eq!(mapping["C"], 0);
    }

    #[test]
    fn test_convert_sorted() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edges_from([(30, 10), (10, 20)]);
        let (_, mapping): (Graph<usize>, _) = convert_node_labels_to_integers_sorted(&graph, 0);
        assert_eq!(mapping, HashMap::from([(10, 0), (20, 1), (30, 2)]));

        let result: Result<(Graph<usize>, _)> =
            convert_node_labels_to_integers(&graph, 0, LabelOrdering::Sorted);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Station {
        code: &'static str,
    }

    #[test]
    fn test_convert_unordered_labels() {
        let (a, b, c) = (Station { code: "AMS" }, Station { code: "BER" }, Station { code: "CDG" });
        let mut graph: Graph<Station> = Graph::new();
        graph.add_edges_from([(b.clone(), a.clone()), (a.clone(), c.clone())]);

        let (numbered, mapping): (Graph<usize>, _) =
            convert_node_labels_to_integers(&graph, 1, LabelOrdering::Default).unwrap();
        assert_eq!(mapping[&b], 1);
        assert_eq!(mapping[&a], 2);
        assert_eq!(mapping[&c], 3);
        assert!(numbered.has_edge(&1, &2));
        assert!(numbered.has_edge(&2, &3));

        let (_, mapping): (Graph<usize>, _) =
            convert_node_labels_to_integers(&graph, 0, LabelOrdering::DecreasingDegree).unwrap();
        assert_eq!(mapping[&a], 0);
    }

    #[test]
    fn test_ordering_keywords() {
        assert_eq!(
            LabelOrdering::from_keyword("increasing degree").unwrap(),
            LabelOrdering::IncreasingDegree
        );
        assert_eq!(LabelOrdering::from_keyword("sorted").unwrap(), LabelOrdering::Sorted);
        assert_eq!(LabelOrdering::DecreasingDegree.to_string(), "decreasing degree");
        assert!(matches!(
            LabelOrdering::from_keyword("random"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_relabel_copy() {
        let graph = paw();
        let mapping = HashMap::from([("A", "aardvark"), ("B", "bear"), ("C", "cat"), ("D", "dog")]);
        let renamed = relabel_nodes_from_map(&graph, &mapping);

        let mut nodes: Vec<_> = renamed.nodes().copied().collect();
        nodes.sort_unstable();
        assert_eq!(nodes, vec!["aardvark", "bear", "cat", "dog"]);
        assert!(renamed.has_edge(&"cat", &"dog"));
        assert_eq!(renamed.name(), "paw");
        assert!(graph.has_node(&"A"));
    }

    #[test]
    fn test_relabel_function() {
        let graph = paw();
        let codes: Graph<u32> = relabel_nodes(&graph, |n: &&str| u32::from(n.as_bytes()[0]));
        let mut nodes: Vec<u32> = codes.nodes().copied().collect();
        nodes.sort_unstable();
        assert_eq!(nodes, vec![65, 66, 67, 68]);
    }

    #[test]
    fn test_relabel_copy_does_not_share_records() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge_with(1, 2, crate::attrs([("weight", AttrValue::from(2.0))]));
        let copy = relabel_nodes_from_map(&graph, &HashMap::from([(1, 10)]));

        copy.edge_data(&10, &2).unwrap().borrow_mut().insert("weight".into(), AttrValue::from(5.0));
        assert_eq!(graph.edge_data(&1, &2).unwrap().borrow()["weight"], AttrValue::Float(2.0));
    }

    #[test]
    fn test_relabel_digraph_in_place() {
        let mut graph: DiGraph<&str> = DiGraph::new();
        graph.add_edges_from([("A", "B"), ("A", "C"), ("B", "C"), ("C", "D")]);
        let mapping = HashMap::from([("A", "aardvark"), ("B", "bear"), ("C", "cat"), ("D", "dog")]);
        relabel_nodes_in_place(&mut graph, &mapping).unwrap();

        let mut nodes: Vec<_> = graph.nodes().copied().collect();
        nodes.sort_unstable();
        assert_eq!(nodes, vec!["aardvark", "bear", "cat", "dog"]);
        assert!(graph.has_edge(&"aardvark", &"bear"));
        assert!(!graph.has_edge(&"bear", &"aardvark"));
        assert_eq!(graph.number_of_edges(), 4);
    }

    #[test]
    fn test_relabel_in_place_overlapping() {
        let mut graph: DiGraph<u32> = DiGraph::new();
        graph.add_edges_from([(1, 2), (2, 3), (3, 3)]);
        graph.node_attrs_mut(&1).unwrap().insert("tag".into(), AttrValue::from("first"));

        relabel_nodes_in_place(&mut graph, &HashMap::from([(1, 2), (2, 3), (3, 4)])).unwrap();

        let mut edges = graph.edges(None);
        edges.sort_unstable();
        assert_eq!(edges, vec![(2, 3), (3, 4), (4, 4)]);
        assert_eq!(graph.node_attrs(&2).unwrap()["tag"], AttrValue::from("first"));
    }

    #[test]
    fn test_relabel_in_place_cycle_is_unfeasible() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edges_from([(1, 2)]);
        let result = relabel_nodes_in_place(&mut graph, &HashMap::from([(1, 2), (2, 1)]));
        assert!(result.unwrap_err().is_unfeasible());
    }

    #[test]
    fn test_relabel_in_place_missing() {
        let mut graph = paw();
        let result = relabel_nodes_in_place(&mut graph, &HashMap::from([("0", "aardvark")]));
        assert!(matches!(result, Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_relabel_in_place_identity_keeps_isolated_node() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_node(7);
        relabel_nodes_in_place(&mut graph, &HashMap::from([(7, 7)])).unwrap();
        assert!(graph.has_node(&7));
    }
}
