#![allow(unused)]
extern crate netgraph;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use netgraph::{
    algorithms::{
        centrality::{betweenness_centrality, edge_betweenness_centrality, BetweennessConfig, EdgeBetweennessConfig},
        clique::{find_cliques, find_cliques_recursive},
        dag::topological_sort,
    },
    generators::{balanced_tree, complete_graph, cycle_graph},
    DiGraph, Graph,
};
use std::hint::black_box;

/// A ring of `n` nodes where every node is also linked to the nodes two and three steps ahead.
fn ring_lattice(n: usize) -> Graph<usize> {
    let mut graph: Graph<usize> = cycle_graph(n);
    for u in 0..n {
        graph.add_edge(u, (u + 2) % n);
        graph.add_edge(u, (u + 3) % n);
    }
    graph
}

/// Benchmark Brandes betweenness on ring lattices of growing size
///
/// Compares the BFS kernel against the Dijkstra kernel on the same topology
/// (every edge carries the default weight, so both produce the same scores).
fn bench_betweenness(c: &mut Criterion) {
    let mut group = c.benchmark_group("betweenness");
    for n in [64usize, 256] {
        let graph = ring_lattice(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("unweighted", n), &graph, |b, graph| {
            let config = BetweennessConfig::default();
            b.iter(|| black_box(betweenness_centrality(black_box(graph), &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("weighted", n), &graph, |b, graph| {
            let config = BetweennessConfig::default().with_weight("weight");
            b.iter(|| black_box(betweenness_centrality(black_box(graph), &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("edges", n), &graph, |b, graph| {
            let config = EdgeBetweennessConfig::default();
            b.iter(|| black_box(edge_betweenness_centrality(black_box(graph), &config).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark lazy vs recursive Bron–Kerbosch
fn bench_cliques(c: &mut Criterion) {
    let lattice = ring_lattice(512);
    let dense: Graph<usize> = complete_graph(48);

    let mut group = c.benchmark_group("cliques");
    group.bench_function("lazy_lattice", |b| {
        b.iter(|| black_box(find_cliques(black_box(&lattice)).count()));
    });
    group.bench_function("recursive_lattice", |b| {
        b.iter(|| black_box(find_cliques_recursive(black_box(&lattice)).len()));
    });
    group.bench_function("lazy_complete", |b| {
        b.iter(|| black_box(find_cliques(black_box(&dense)).count()));
    });
    group.finish();
}

/// Benchmark topological sorting of a deep balanced tree
fn bench_topological_sort(c: &mut Criterion) {
    let tree: DiGraph<usize> = balanced_tree(3, 8);
    let nodes = tree.number_of_nodes();

    let mut group = c.benchmark_group("topological_sort");
    group.throughput(Throughput::Elements(nodes as u64));
    group.bench_function("balanced_tree_3_8", |b| {
        b.iter(|| black_box(topological_sort(black_box(&tree), None).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_betweenness, bench_cliques, bench_topological_sort);
criterion_main!(benches);
