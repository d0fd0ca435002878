//! Container integration tests.
//!
//! These tests exercise `Graph` and `DiGraph` through the public API only:
//! 1. Adjacency symmetry and shared edge records
//! 2. The successor/predecessor duality of directed graphs
//! 3. Idempotent insertion and cascading removal
//! 4. Bootstrapping from edge lists and adjacency lists

use std::rc::Rc;

use netgraph::{
    attrs,
    generators::complete_graph,
    graph::{
        convert::{from_adjacency, from_edges, from_graph, to_adjacency},
        functions::{density, info},
    },
    AttrValue, DiGraph, Error, Graph, Result,
};

fn sample_graph() -> Graph<&'static str> {
    from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "d")])
}

#[test]
fn test_adjacency_is_symmetric() -> Result<()> {
    let graph = sample_graph();
    for u in graph.nodes() {
        for (v, record) in graph.adjacency(u)? {
            let back = graph
                .edge_data(v, u)
                .expect("reverse adjacency entry missing");
            assert!(Rc::ptr_eq(record, &back), "{u:?}-{v:?} records differ");
        }
    }
    Ok(())
}

#[test]
fn test_edge_record_is_shared() {
    let mut graph: Graph<u32> = Graph::new();
    graph.add_edge_with(1, 2, attrs([("weight", AttrValue::from(1.5))]));

    graph
        .edge_data(&2, &1)
        .unwrap()
        .borrow_mut()
        .insert("color".into(), "blue".into());
    let record = graph.edge_data(&1, &2).unwrap();
    assert_eq!(record.borrow()["color"], AttrValue::from("blue"));
    assert_eq!(record.borrow()["weight"], AttrValue::Float(1.5));
}

#[test]
fn test_directed_duality() -> Result<()> {
    let mut graph: DiGraph<u32> = DiGraph::new();
    graph.add_edges_from([(1, 2), (2, 3), (3, 1), (1, 4), (4, 4)]);

    for u in graph.nodes() {
        for v in graph.successors(u)? {
            assert!(graph.predecessors(v)?.any(|p| p == u));
            assert!(Rc::ptr_eq(
                &graph.edge_data(u, v).unwrap(),
                &graph.edge_data(u, v).unwrap()
            ));
        }
        for p in graph.predecessors(u)? {
            assert!(graph.has_successor(p, u));
        }
        assert_eq!(graph.degree(u)?, graph.in_degree(u)? + graph.out_degree(u)?);
    }
    assert!(graph.has_edge(&1, &2));
    assert!(!graph.has_edge(&2, &1));
    Ok(())
}

#[test]
fn test_insertion_is_idempotent() {
    let mut graph: Graph<u32> = Graph::new();
    graph.add_node_with(1, attrs([("color", AttrValue::from("red"))]));
    graph.add_node_with(1, attrs([("size", AttrValue::from(3))]));
    graph.add_edge(1, 2);
    graph.add_edge(2, 1);

    assert_eq!(graph.number_of_nodes(), 2);
    assert_eq!(graph.number_of_edges(), 1);
    let record = graph.node_attrs(&1).unwrap();
    assert_eq!(record.len(), 2);
}

#[test]
fn test_removal_cascades() {
    let mut graph: Graph<usize> = complete_graph(3);
    graph.remove_node(&0).unwrap();

    assert_eq!(graph.number_of_nodes(), 2);
    assert_eq!(graph.edges(None), vec![(1, 2)]);
    assert!(matches!(graph.remove_node(&0), Err(Error::NodeNotFound(_))));
    assert!(matches!(graph.remove_edge(&0, &1), Err(Error::EdgeNotFound(_, _))));

    graph.remove_nodes_from([&0, &7]);
    graph.remove_edges_from([(5, 6)]);
    assert_eq!(graph.number_of_edges(), 1);
}

#[test]
fn test_degree_sum_is_twice_the_edge_count() {
    let graph = sample_graph();
    let total: usize = graph.degrees().into_iter().map(|(_, d)| d).sum();
    assert_eq!(total, 2 * graph.number_of_edges());
    assert_eq!(graph.number_of_selfloops(), 1);
}

#[test]
fn test_bootstrap_round_trip() {
    let directed: DiGraph<u32> = from_adjacency([(1, vec![2, 3]), (2, vec![3]), (4, vec![])]);
    assert_eq!(directed.number_of_nodes(), 4);
    assert_eq!(
        to_adjacency(&directed, None),
        vec![(1, vec![2, 3]), (2, vec![3]), (4, vec![]), (3, vec![])]
    );

    let undirected: Graph<u32> = from_graph(&directed);
    assert_eq!(undirected.number_of_edges(), 3);
    assert!(undirected.has_edge(&3, &1));
}

#[test]
fn test_summaries() -> Result<()> {
    let graph: Graph<usize> = complete_graph(4);
    assert_eq!(density(&graph), 1.0);

    let summary = info(&graph, None)?;
    assert!(summary.starts_with("Name: complete_graph(4)\nType: Graph"));
    assert!(summary.ends_with("Average degree: 3.0000"));
    Ok(())
}
