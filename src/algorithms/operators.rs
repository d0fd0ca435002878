//! Binary graph operators.
//!
//! Every operator takes two graphs of the same container type and returns a new one;
//! neither input is modified. Node and edge attributes are deep-copied where an
//! operator keeps them. The result is named after the operator and the input names,
//! e.g. `"union(g, h)"`.
//!
//! | Operator | Node sets | Edges of the result |
//! |----------|-----------|---------------------|
//! | [`union`] | disjoint | both, with attributes |
//! | [`disjoint_union`] | any, relabeled to integers | both, with attributes |
//! | [`compose`] | any | both, `h` attributes winning |
//! | [`intersection`] | equal | present in both |
//! | [`difference`] | equal | in `g` but not in `h` |
//! | [`symmetric_difference`] | equal | in exactly one of them |
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{algorithms::operators::{difference, intersection}, Graph};
//!
//! let mut g: Graph<u32> = Graph::new();
//! g.add_nodes_from(1..=4);
//! g.add_edges_from([(1, 2), (2, 3)]);
//! let mut h: Graph<u32> = Graph::new();
//! h.add_nodes_from(1..=4);
//! h.add_edges_from([(2, 3), (3, 4)]);
//!
//! assert_eq!(intersection(&g, &h)?.edges(None), vec![(2, 3)]);
//! assert_eq!(difference(&g, &h)?.edges(None), vec![(1, 2)]);
//! # Ok::<(), netgraph::Error>(())
//! ```

use tracing::debug;

use crate::{
    graph::{
        convert::from_graph,
        functions::create_empty_copy,
        AttrValue, Build, GraphBase, Predecessors, Successors,
    },
    relabel::{convert_node_labels_to_integers, relabel_nodes, LabelOrdering},
    Result,
};

fn name_of<G: GraphBase>(graph: &G) -> &str {
    graph
        .graph_record()
        .and_then(|record| record.get("name"))
        .and_then(AttrValue::as_str)
        .unwrap_or("")
}

fn set_name<G: Build>(graph: &mut G, name: String) {
    graph
        .graph_attrs_mut()
        .insert("name".to_string(), AttrValue::Str(name));
}

fn same_kind<G: GraphBase>(g: &G, h: &G) -> Result<()> {
    if g.is_multigraph() != h.is_multigraph() {
        return Err(invalid_argument!("G and H must both be graphs or multigraphs"));
    }
    Ok(())
}

fn same_nodes<G: GraphBase>(g: &G, h: &G) -> Result<()> {
    let equal = g.node_count() == h.node_count()
        && g.node_ids()
            .filter_map(|id| g.node_key(id))
            .all(|key| h.node_id(key).is_some());
    if !equal {
        return Err(invalid_argument!("Node sets of graphs are not equal."));
    }
    Ok(())
}

// Adds the nodes, edges and graph attributes of `source` to `target`; existing records
// are merged with `source` winning.
fn merge_into<G: Successors + Build>(target: &mut G, source: &G) {
    if let Some(record) = source.graph_record() {
        target
            .graph_attrs_mut()
            .extend(record.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    for id in source.node_ids() {
        if let Some(key) = source.node_key(id) {
            target.add_node_with(key.clone(), source.node_record(id).cloned().unwrap_or_default());
        }
    }
    for (u, v) in source.edge_ids() {
        let (Some(lu), Some(lv), Some(record)) =
            (source.node_key(u), source.node_key(v), source.edge_record(u, v))
        else {
            continue;
        };
        target.add_edge_with(lu.clone(), lv.clone(), record.borrow().clone());
    }
}

// Edges of `graph` whose presence in `other` equals `keep_if_present`.
fn filtered_edges<G: Successors>(
    graph: &G,
    other: &G,
    keep_if_present: bool,
) -> Vec<(G::Node, G::Node)> {
    graph
        .edge_ids()
        .filter_map(|(u, v)| Some((graph.node_key(u)?.clone(), graph.node_key(v)?.clone())))
        .filter(|(u, v)| {
            let present = match (other.node_id(u), other.node_id(v)) {
                (Some(ou), Some(ov)) => other.edge_record(ou, ov).is_some(),
                _ => false,
            };
            present == keep_if_present
        })
        .collect()
}

fn add_plain_edges<G: Build>(graph: &mut G, edges: Vec<(G::Node, G::Node)>) {
    for (u, v) in edges {
        graph.add_edge_with(u, v, Default::default());
    }
}

/// Returns the union of two graphs with disjoint node sets.
///
/// Graph attributes of `h` override those of `g`; the result is then named
/// `"union(<g>, <h>)"`. Use [`union_relabeled`] or [`disjoint_union`] for overlapping
/// node sets.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the node sets
/// intersect or only one input is a multigraph.
pub fn union<G: Successors + Build>(g: &G, h: &G) -> Result<G> {
    same_kind(g, h)?;
    let shared = g
        .node_ids()
        .filter_map(|id| g.node_key(id))
        .find(|key| h.node_id(key).is_some());
    if let Some(shared) = shared {
        return Err(invalid_argument!(
            "The node sets of G and H are not disjoint ({:?} is in both). Use union_relabeled \
             or disjoint_union.",
            shared
        ));
    }

    let mut result: G = from_graph(g);
    merge_into(&mut result, h);
    set_name(&mut result, format!("union({}, {})", name_of(g), name_of(h)));
    debug!(nodes = result.node_count(), "union built");
    Ok(result)
}

/// Relabels both graphs with the given functions, then returns their [`union`].
///
/// The usual relabelings prefix every node, e.g. `|n| format!("G-{n}")`.
///
/// # Errors
///
/// Same as [`union`], applied to the relabeled graphs.
pub fn union_relabeled<G, T, F, H>(g: &G, h: &G, rename_g: F, rename_h: H) -> Result<T>
where
    G: Successors,
    T: Successors + Build,
    F: FnMut(&G::Node) -> T::Node,
    H: FnMut(&G::Node) -> T::Node,
{
    let renamed_g: T = relabel_nodes(g, rename_g);
    let renamed_h: T = relabel_nodes(h, rename_h);
    let mut result = union(&renamed_g, &renamed_h)?;
    set_name(&mut result, format!("union({}, {})", name_of(g), name_of(h)));
    Ok(result)
}

/// Returns the union of two graphs after numbering the nodes of `g` from `0` and those
/// of `h` from `g.node_count()`.
///
/// # Errors
///
/// Same as [`union`]; the renumbered node sets never intersect.
pub fn disjoint_union<G, T>(g: &G, h: &G) -> Result<T>
where
    G: Successors + Predecessors,
    T: Successors + Build<Node = usize>,
{
    let (numbered_g, _): (T, _) = convert_node_labels_to_integers(g, 0, LabelOrdering::Default)?;
    let (numbered_h, _): (T, _) =
        convert_node_labels_to_integers(h, g.node_count(), LabelOrdering::Default)?;

    let mut result = union(&numbered_g, &numbered_h)?;
    for source in [g, h] {
        if let Some(record) = source.graph_record() {
            result
                .graph_attrs_mut()
                .extend(record.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    set_name(&mut result, format!("disjoint_union({}, {})", name_of(g), name_of(h)));
    Ok(result)
}

/// Returns the graph on the common node set holding the edges present in both graphs.
///
/// Edge attributes are not copied.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the node sets
/// differ or only one input is a multigraph.
pub fn intersection<G: Successors + Build>(g: &G, h: &G) -> Result<G> {
    same_kind(g, h)?;
    same_nodes(g, h)?;

    let mut result = create_empty_copy(g, true);
    let g_edges = g.edge_ids().count();
    let h_edges = h.edge_ids().count();
    let (smaller, larger) = if g_edges < h_edges { (g, h) } else { (h, g) };
    add_plain_edges(&mut result, filtered_edges(smaller, larger, true));

    set_name(&mut result, format!("intersection({}, {})", name_of(g), name_of(h)));
    Ok(result)
}

/// Returns the graph on the common node set holding the edges of `g` missing from `h`.
///
/// # Errors
///
/// Same as [`intersection`].
pub fn difference<G: Successors + Build>(g: &G, h: &G) -> Result<G> {
    same_kind(g, h)?;
    same_nodes(g, h)?;

    let mut result = create_empty_copy(g, true);
    add_plain_edges(&mut result, filtered_edges(g, h, false));
    set_name(&mut result, format!("difference({}, {})", name_of(g), name_of(h)));
    Ok(result)
}

/// Returns the graph on the common node set holding the edges present in exactly one of
/// the two graphs.
///
/// # Errors
///
/// Same as [`intersection`].
pub fn symmetric_difference<G: Successors + Build>(g: &G, h: &G) -> Result<G> {
    same_kind(g, h)?;
    same_nodes(g, h)?;

    let mut result = create_empty_copy(g, true);
    add_plain_edges(&mut result, filtered_edges(g, h, false));
    add_plain_edges(&mut result, filtered_edges(h, g, false));
    set_name(
        &mut result,
        format!("symmetric_difference({}, {})", name_of(g), name_of(h)),
    );
    Ok(result)
}

/// Returns the graph holding the nodes and edges of both graphs.
///
/// Where both graphs carry a record for the same node, edge or graph attribute, the
/// values of `h` win.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if only one input
/// is a multigraph.
pub fn compose<G: Successors + Build>(g: &G, h: &G) -> Result<G> {
    same_kind(g, h)?;
    let mut result: G = from_graph(g);
    merge_into(&mut result, h);
    set_name(&mut result, format!("compose({}, {})", name_of(g), name_of(h)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{complete_graph, path_graph},
        graph::{attrs, AttrValue},
        DiGraph, Error, Graph,
    };

    fn pair() -> (Graph<u32>, Graph<u32>) {
        let mut g = Graph::with_name("g");
        g.add_nodes_from(1..=4);
        g.add_edges_from([(1, 2), (2, 3)]);
        let mut h = Graph::with_name("h");
        h.add_nodes_from(1..=4);
        h.add_edges_from([(2, 3), (3, 4)]);
        (g, h)
    }

    fn sorted(mut edges: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
        for edge in &mut edges {
            if edge.0 > edge.1 {
                *edge = (edge.1, edge.0);
            }
        }
        edges.sort_unstable();
        edges
    }

    fn stars() -> (DiGraph<String>, DiGraph<String>) {
        let mut g = DiGraph::new();
        g.add_edges_from(["B", "C", "D"].map(|v| ("A".to_string(), v.to_string())));
        let mut h = DiGraph::new();
        h.add_edges_from(["2", "3", "4"].map(|v| ("1".to_string(), v.to_string())));
        (g, h)
    }

    #[test]
    fn test_intersection() {
        let (g, h) = pair();
        let result = intersection(&g, &h).unwrap();
        assert_eq!(result.number_of_nodes(), 4);
        assert_eq!(sorted(result.edges(None)), vec![(2, 3)]);
        assert_eq!(result.name(), "intersection(g, h)");
    }

    #[test]
    fn test_difference() {
        let (g, h) = pair();
        assert_eq!(sorted(difference(&g, &h).unwrap().edges(None)), vec![(1, 2)]);
        assert_eq!(sorted(difference(&h, &g).unwrap().edges(None)), vec![(3, 4)]);
        assert_eq!(g.name(), "g");

        let four: Graph<usize> = path_graph(4);
        let three: Graph<usize> = path_graph(3);
        assert!(matches!(difference(&four, &three), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_symmetric_difference() {
        let (g, h) = pair();
        let result = symmetric_difference(&g, &h).unwrap();
        assert_eq!(result.number_of_nodes(), 4);
        assert_eq!(sorted(result.edges(None)), vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn test_directed_difference() {
        let mut g: DiGraph<u32> = DiGraph::new();
        g.add_edges_from([(1, 2), (2, 1)]);
        let mut h: DiGraph<u32> = DiGraph::new();
        h.add_edges_from([(1, 2)]);
        h.add_node(2);

        assert_eq!(difference(&g, &h).unwrap().edges(None), vec![(2, 1)]);
        assert_eq!(intersection(&g, &h).unwrap().edges(None), vec![(1, 2)]);
    }

    #[test]
    fn test_union_requires_disjoint_nodes() {
        let k3: Graph<usize> = complete_graph(3);
        let p3: Graph<usize> = path_graph(3);
        assert!(matches!(union(&k3, &p3), Err(Error::InvalidArgument(_))));

        let renamed: Graph<String> =
            union_relabeled(&k3, &p3, |n| format!("k{n}"), |n| format!("p{n}")).unwrap();
        assert_eq!(renamed.number_of_nodes(), 6);
        assert_eq!(renamed.number_of_edges(), 5);
        assert!(renamed.has_edge(&"k0".to_string(), &"k2".to_string()));
        assert_eq!(renamed.name(), "union(complete_graph(3), path_graph(3))");
    }

    #[test]
    fn test_union_and_compose_agree() {
        let (g, h) = stars();
        let united = union(&g, &h).unwrap();
        let composed = compose(&g, &h).unwrap();

        let mut union_edges = united.edges(None);
        let mut compose_edges = composed.edges(None);
        union_edges.sort_unstable();
        compose_edges.sort_unstable();
        assert_eq!(union_edges, compose_edges);
        assert_eq!(union_edges.len(), 6);
    }

    #[test]
    fn test_compose_prefers_second_attributes() {
        let mut g: Graph<u32> = Graph::with_name("g");
        g.add_edge_with(1, 2, attrs([("weight", AttrValue::from(1.0)), ("color", AttrValue::from("red"))]));
        let mut h: Graph<u32> = Graph::with_name("h");
        h.add_edge_with(2, 1, attrs([("weight", AttrValue::from(5.0))]));
        h.add_edge(2, 3);

        let composed = compose(&g, &h).unwrap();
        let record = composed.edge_data(&1, &2).unwrap();
        assert_eq!(record.borrow()["weight"], AttrValue::Float(5.0));
        assert_eq!(record.borrow()["color"], AttrValue::from("red"));
        assert_eq!(composed.number_of_edges(), 2);
        assert_eq!(composed.name(), "compose(g, h)");

        record.borrow_mut().insert("weight".into(), AttrValue::from(9.0));
        assert_eq!(h.edge_data(&1, &2).unwrap().borrow()["weight"], AttrValue::Float(5.0));
    }

    #[test]
    fn test_disjoint_union() {
        let (g, _) = stars();
        let doubled: DiGraph<usize> = disjoint_union(&g, &g).unwrap();
        assert_eq!(doubled.number_of_nodes(), 2 * g.number_of_nodes());
        assert_eq!(doubled.number_of_edges(), 2 * g.number_of_edges());
        assert!(doubled.has_edge(&0, &1));
        assert!(doubled.has_edge(&4, &5));

        let k3: Graph<usize> = complete_graph(3);
        let p3: Graph<usize> = path_graph(3);
        let joined: Graph<usize> = disjoint_union(&k3, &p3).unwrap();
        assert_eq!(joined.number_of_nodes(), 6);
        assert_eq!(joined.number_of_edges(), 5);
        assert_eq!(joined.name(), "disjoint_union(complete_graph(3), path_graph(3))");
    }
}
