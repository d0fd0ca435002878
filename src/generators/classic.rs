use crate::{
    generators::set_name,
    graph::{Attrs, Build},
};

fn add_edge<G: Build<Node = usize>>(graph: &mut G, u: usize, v: usize) {
    graph.add_edge_with(u, v, Attrs::new());
}

/// Returns the graph without nodes.
#[must_use]
pub fn null_graph<G: Build>() -> G {
    let mut graph = G::default();
    set_name(&mut graph, "null_graph()".to_string());
    graph
}

/// Returns the graph with the single node `0`.
#[must_use]
pub fn trivial_graph<G: Build<Node = usize>>() -> G {
    let mut graph: G = empty_graph(1);
    set_name(&mut graph, "trivial_graph()".to_string());
    graph
}

/// Returns the graph on nodes `0..n` without edges.
#[must_use]
pub fn empty_graph<G: Build<Node = usize>>(n: usize) -> G {
    let mut graph = G::default();
    for node in 0..n {
        graph.add_node_with(node, Attrs::new());
    }
    set_name(&mut graph, format!("empty_graph({n})"));
    graph
}

/// Returns the complete graph `K_n`.
///
/// Directed targets receive both orientations of every pair.
#[must_use]
pub fn complete_graph<G: Build<Node = usize>>(n: usize) -> G {
    let mut graph: G = empty_graph(n);
    let directed = graph.is_directed();
    for u in 0..n {
        for v in 0..n {
            if u < v || (directed && u != v) {
                add_edge(&mut graph, u, v);
            }
        }
    }
    set_name(&mut graph, format!("complete_graph({n})"));
    graph
}

/// Returns the path `0 - 1 - ... - n-1`.
#[must_use]
pub fn path_graph<G: Build<Node = usize>>(n: usize) -> G {
    let mut graph: G = empty_graph(n);
    for u in 1..n {
        add_edge(&mut graph, u - 1, u);
    }
    set_name(&mut graph, format!("path_graph({n})"));
    graph
}

/// Returns the cycle `0 - 1 - ... - n-1 - 0`.
#[must_use]
pub fn cycle_graph<G: Build<Node = usize>>(n: usize) -> G {
    let mut graph: G = path_graph(n);
    if n > 1 {
        add_edge(&mut graph, n - 1, 0);
    }
    set_name(&mut graph, format!("cycle_graph({n})"));
    graph
}

/// Returns the `rows` by `cols` lattice on the nodes `(i, j)`.
///
/// Each node is joined to its horizontal and vertical neighbors. With `periodic`, the
/// first and last column are joined when there are more than two columns, and likewise
/// for rows. Directed targets receive both orientations of every edge.
///
/// # Examples
///
/// ```rust
/// use netgraph::{generators::grid_2d_graph, Graph};
///
/// let grid: Graph<(usize, usize)> = grid_2d_graph(2, 3, false);
/// assert_eq!(grid.number_of_edges(), 7);
/// assert!(grid.has_edge(&(0, 1), &(1, 1)));
///
/// let torus: Graph<(usize, usize)> = grid_2d_graph(3, 3, true);
/// assert!(torus.has_edge(&(0, 0), &(2, 0)));
/// assert_eq!(torus.name(), "periodic_grid_2d_graph(3, 3)");
/// ```
#[must_use]
pub fn grid_2d_graph<G: Build<Node = (usize, usize)>>(rows: usize, cols: usize, periodic: bool) -> G {
    let mut graph = G::default();
    for i in 0..rows {
        for j in 0..cols {
            graph.add_node_with((i, j), Attrs::new());
        }
    }

    let mut edges = Vec::new();
    for i in 0..rows {
        for j in 0..cols {
            if i > 0 {
                edges.push(((i, j), (i - 1, j)));
            }
            if j > 0 {
                edges.push(((i, j), (i, j - 1)));
            }
        }
    }
    if periodic {
        if cols > 2 {
            edges.extend((0..rows).map(|i| ((i, 0), (i, cols - 1))));
        }
        if rows > 2 {
            edges.extend((0..cols).map(|j| ((0, j), (rows - 1, j))));
        }
    }

    let directed = graph.is_directed();
    for (u, v) in edges {
        graph.add_edge_with(u, v, Attrs::new());
        if directed {
            graph.add_edge_with(v, u, Attrs::new());
        }
    }

    let kind = if periodic { "periodic_grid_2d_graph" } else { "grid_2d_graph" };
    set_name(&mut graph, format!("{kind}({rows}, {cols})"));
    graph
}

// Parent i gets children r*i+1 ..= r*i+r, as far as nodes remain.
fn add_tree_edges<G: Build<Node = usize>>(graph: &mut G, n: usize, r: usize) {
    if r == 0 {
        return;
    }
    for child in 1..n {
        add_edge(graph, (child - 1) / r, child);
    }
}

/// Returns the full `r`-ary tree on `n` nodes, filled breadth first from root `0`.
#[must_use]
pub fn full_rary_tree<G: Build<Node = usize>>(r: usize, n: usize) -> G {
    let mut graph: G = empty_graph(n);
    add_tree_edges(&mut graph, n, r);
    set_name(&mut graph, format!("full_rary_tree({r}, {n})"));
    graph
}

/// Returns the perfectly balanced `r`-ary tree of height `h`.
///
/// The tree has `(r^(h+1) - 1) / (r - 1)` nodes, or `h + 1` for `r == 1`.
#[must_use]
pub fn balanced_tree<G: Build<Node = usize>>(r: usize, h: u32) -> G {
    let n = match r {
        0 => 1,
        1 => h as usize + 1,
        _ => (r.pow(h + 1) - 1) / (r - 1),
    };
    let mut graph: G = empty_graph(n);
    add_tree_edges(&mut graph, n, r);
    set_name(&mut graph, format!("balanced_tree({r}, {h})"));
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::functions::degree_histogram, DiGraph, Graph};

    #[test]
    fn test_complete_graph() {
        for m in [0, 1, 3, 5] {
            let graph: Graph<usize> = complete_graph(m);
            assert_eq!(graph.number_of_nodes(), m);
            assert_eq!(graph.number_of_edges(), m * m.saturating_sub(1) / 2);

            let directed: DiGraph<usize> = complete_graph(m);
            assert_eq!(directed.number_of_edges(), m * m.saturating_sub(1));
        }
    }

    #[test]
    fn test_cycle_graph() {
        let graph: Graph<usize> = cycle_graph(4);
        assert_eq!(graph.edges(None), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);

        let directed: DiGraph<usize> = cycle_graph(4);
        assert!(directed.has_edge(&1, &2));
        assert!(!directed.has_edge(&2, &1));
        assert!(directed.has_edge(&3, &0));
    }

    #[test]
    fn test_empty_and_path() {
        let graph: Graph<usize> = empty_graph(3);
        assert_eq!(graph.number_of_edges(), 0);
        assert_eq!(graph.name(), "empty_graph(3)");

        let path: Graph<usize> = path_graph(4);
        assert_eq!(path.edges(None), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(path_graph::<Graph<usize>>(0).number_of_nodes(), 0);
    }

    #[test]
    fn test_balanced_tree() {
        for (r, h) in [(2usize, 2u32), (3, 3), (6, 2)] {
            let tree: Graph<usize> = balanced_tree(r, h);
            let order = (r.pow(h + 1) - 1) / (r - 1);
            assert_eq!(tree.number_of_nodes(), order);
            assert_eq!(tree.number_of_edges(), order - 1);

            let histogram = degree_histogram(&tree);
            assert_eq!(histogram[0], 0);
            assert_eq!(histogram[1], r.pow(h));
            assert_eq!(histogram[r], 1);
            assert_eq!(histogram[r + 1], order - r.pow(h) - 1);
            assert_eq!(histogram.len(), r + 2);
        }
    }

    #[test]
    fn test_full_rary_tree() {
        let tree: Graph<usize> = full_rary_tree(2, 9);
        assert_eq!(tree.number_of_nodes(), 9);
        let histogram = degree_histogram(&tree);
        assert_eq!(histogram, vec![0, 5, 1, 3]);

        assert_eq!(full_rary_tree::<Graph<usize>>(3, 20).number_of_nodes(), 20);
        assert_eq!(full_rary_tree::<Graph<usize>>(0, 10).number_of_edges(), 0);
    }

    #[test]
    fn test_null_and_trivial() {
        let null: Graph<usize> = null_graph();
        assert_eq!(null.number_of_nodes(), 0);
        assert_eq!(null.name(), "null_graph()");

        let trivial: DiGraph<usize> = trivial_graph();
        assert_eq!(trivial.nodes().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(trivial.number_of_edges(), 0);
        assert_eq!(trivial.name(), "trivial_graph()");
    }

    #[test]
    fn test_grid_2d_graph() {
        let (rows, cols) = (4, 6);
        let grid: Graph<(usize, usize)> = grid_2d_graph(rows, cols, false);
        assert_eq!(grid.number_of_nodes(), rows * cols);
        assert_eq!(grid.number_of_edges(), (rows - 1) * cols + (cols - 1) * rows);
        assert_eq!(grid.degree(&(0, 0)).unwrap(), 2);
        assert_eq!(grid.degree(&(1, 1)).unwrap(), 4);
        assert_eq!(grid.name(), "grid_2d_graph(4, 6)");

        let directed: DiGraph<(usize, usize)> = grid_2d_graph(rows, cols, false);
        assert_eq!(directed.number_of_edges(), 2 * grid.number_of_edges());
        assert!(directed.has_edge(&(0, 0), &(0, 1)));
        assert!(directed.has_edge(&(0, 1), &(0, 0)));
    }

    #[test]
    fn test_periodic_grid_2d_graph() {
        let torus: Graph<(usize, usize)> = grid_2d_graph(3, 4, true);
        assert_eq!(torus.number_of_edges(), 2 * 3 * 4);
        assert!(torus.degrees().iter().all(|(_, d)| *d == 4));

        let ladder: Graph<(usize, usize)> = grid_2d_graph(2, 3, true);
        assert!(ladder.has_edge(&(0, 0), &(0, 2)));
        assert_eq!(ladder.number_of_edges(), 7 + 2);
        assert_eq!(grid_2d_graph::<Graph<(usize, usize)>>(0, 5, true).number_of_nodes(), 0);
    }
}
