//! Single-source shortest paths.
//!
//! The crate-internal kernel ([`count_paths`]) produces, for one source, the data
//! Brandes' dependency accumulation needs: the settle order, shortest-path predecessor
//! lists and path counts. It runs a BFS for unweighted graphs and a Dijkstra search when
//! a weight attribute is named. The public functions in this module expose plain path
//! lengths and paths on top of the same traversal shapes.
//!
//! Point-to-point queries ([`shortest_path`], [`shortest_path_length`], [`has_path`])
//! dispatch on the weight: a bidirectional BFS without one, Dijkstra with one. An
//! unreachable target is reported as [`Error::NoPath`].
//!
//! # Examples
//!
//! ```rust
//! use netgraph::{algorithms::shortest_paths::{has_path, shortest_path}, generators::cycle_graph, Graph};
//!
//! let graph: Graph<usize> = cycle_graph(7);
//! assert_eq!(shortest_path(&graph, &0, &4, None)?, vec![0, 6, 5, 4]);
//! assert!(has_path(&graph, &0, &3)?);
//! # Ok::<(), netgraph::Error>(())
//! ```

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, VecDeque},
};

use tracing::trace;

use crate::{
    algorithms::lookup,
    graph::{numeric_attr, EdgeRecord, GraphBase, NodeId, Predecessors, Successors},
    Error, Result,
};

/// Shortest-path data for one source, indexed by [`NodeId::index`].
#[derive(Debug)]
pub(crate) struct PathCounts {
    /// Reached nodes in non-decreasing distance order.
    pub order: Vec<NodeId>,
    /// Immediate predecessors of each node on some shortest path.
    pub preds: Vec<Vec<NodeId>>,
    /// Number of shortest paths from the source.
    pub sigma: Vec<f64>,
    /// Distance from the source, `None` for unreached nodes.
    pub dist: Vec<Option<f64>>,
}

impl PathCounts {
    fn new(bound: usize, capacity: usize) -> Self {
        PathCounts {
            order: Vec::with_capacity(capacity),
            preds: vec![Vec::new(); bound],
            sigma: vec![0.0; bound],
            dist: vec![None; bound],
        }
    }
}

/// Runs the traversal matching `weight`: BFS when `None`, Dijkstra otherwise.
pub(crate) fn count_paths<G: Successors>(
    graph: &G,
    source: NodeId,
    weight: Option<&str>,
) -> Result<PathCounts> {
    match weight {
        None => Ok(count_paths_unweighted(graph, source)),
        Some(weight) => count_paths_weighted(graph, source, weight),
    }
}

fn count_paths_unweighted<G: Successors>(graph: &G, source: NodeId) -> PathCounts {
    let mut counts = PathCounts::new(graph.node_bound(), graph.node_count());
    let mut hops: Vec<Option<usize>> = vec![None; graph.node_bound()];
    counts.sigma[source.index()] = 1.0;
    hops[source.index()] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        counts.order.push(v);
        let Some(depth) = hops[v.index()] else {
            continue;
        };
        let sigma_v = counts.sigma[v.index()];

        for w in graph.successors(v) {
            let depth_w = match hops[w.index()] {
                Some(known) => known,
                None => {
                    hops[w.index()] = Some(depth + 1);
                    queue.push_back(w);
                    depth + 1
                }
            };
            if depth_w == depth + 1 {
                counts.sigma[w.index()] += sigma_v;
                counts.preds[w.index()].push(v);
            }
        }
    }

    for (dist, hop) in counts.dist.iter_mut().zip(hops) {
        *dist = hop.map(|h| h as f64);
    }
    counts
}

fn count_paths_weighted<G: Successors>(
    graph: &G,
    source: NodeId,
    weight: &str,
) -> Result<PathCounts> {
    let bound = graph.node_bound();
    let mut counts = PathCounts::new(bound, graph.node_count());
    let mut seen: Vec<Option<f64>> = vec![None; bound];
    let mut settled = vec![false; bound];
    counts.sigma[source.index()] = 1.0;
    seen[source.index()] = Some(0.0);

    // Distances are non-negative, so their bit patterns order like the values. The
    // counter keeps pops of equal distance in push order.
    let mut pushes = 0usize;
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0.0f64.to_bits(), pushes, source, source)));

    while let Some(Reverse((bits, _, pred, v))) = heap.pop() {
        if settled[v.index()] {
            continue;
        }
        let dist = f64::from_bits(bits);
        if v != source {
            counts.sigma[v.index()] += counts.sigma[pred.index()];
        }
        settled[v.index()] = true;
        counts.dist[v.index()] = Some(dist);
        counts.order.push(v);

        for (w, record) in graph.successor_edges(v) {
            if w == v {
                continue;
            }
            let cost = edge_cost(record, weight)?;
            let candidate = dist + cost;
            let known = seen[w.index()];

            if !settled[w.index()] && known.map_or(true, |best| candidate < best) {
                seen[w.index()] = Some(candidate);
                pushes += 1;
                heap.push(Reverse((candidate.to_bits(), pushes, v, w)));
                counts.sigma[w.index()] = 0.0;
                counts.preds[w.index()] = vec![v];
            } else if known == Some(candidate) {
                counts.sigma[w.index()] += counts.sigma[v.index()];
                counts.preds[w.index()].push(v);
            }
        }
    }

    trace!(source = %source, reached = counts.order.len(), "dijkstra search finished");
    Ok(counts)
}

fn edge_cost(record: &EdgeRecord, weight: &str) -> Result<f64> {
    match numeric_attr(record, weight) {
        Some(cost) if cost >= 0.0 => Ok(cost),
        Some(cost) => Err(invalid_argument!(
            "Edge attribute {:?} must not be negative, found {}",
            weight,
            cost
        )),
        None => Err(invalid_argument!("Edge attribute {:?} is not numeric", weight)),
    }
}

/// Returns the hop distance from `source` to every reachable node.
///
/// With `cutoff`, only nodes at most `cutoff` hops away are reported.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`](crate::Error::NodeNotFound) if `source` is not in the
/// graph.
///
/// # Examples
///
/// ```rust
/// use netgraph::{algorithms::shortest_paths::single_source_shortest_path_length, generators::path_graph, Graph};
///
/// let graph: Graph<usize> = path_graph(4);
/// let lengths = single_source_shortest_path_length(&graph, &0, Some(2))?;
/// assert_eq!(lengths.len(), 3);
/// assert_eq!(lengths[&2], 2);
/// # Ok::<(), netgraph::Error>(())
/// ```
pub fn single_source_shortest_path_length<G: Successors>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<usize>,
) -> Result<HashMap<G::Node, usize>> {
    let start = lookup(graph, source)?;
    let mut seen: Vec<Option<usize>> = vec![None; graph.node_bound()];
    let mut level = 0;
    let mut next_level = vec![start];

    while !next_level.is_empty() {
        let this_level = std::mem::take(&mut next_level);
        for v in this_level {
            if seen[v.index()].is_none() {
                seen[v.index()] = Some(level);
                next_level.extend(graph.successors(v));
            }
        }
        if cutoff.is_some_and(|cutoff| cutoff <= level) {
            break;
        }
        level += 1;
    }

    Ok(graph
        .node_ids()
        .filter_map(|id| Some((graph.node_key(id)?.clone(), seen[id.index()]?)))
        .collect())
}

/// Returns one shortest path (as a node sequence) from `source` to every reachable node.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`](crate::Error::NodeNotFound) if `source` is not in the
/// graph.
pub fn single_source_shortest_path<G: Successors>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<usize>,
) -> Result<HashMap<G::Node, Vec<G::Node>>> {
    let start = lookup(graph, source)?;
    let mut parent: Vec<Option<NodeId>> = vec![None; graph.node_bound()];
    let mut reached = vec![start];
    parent[start.index()] = Some(start);

    let mut level = 0;
    let mut frontier = vec![start];
    while !frontier.is_empty() && cutoff.map_or(true, |cutoff| level < cutoff) {
        let mut next = Vec::new();
        for v in frontier {
            for w in graph.successors(v) {
                if parent[w.index()].is_none() {
                    parent[w.index()] = Some(v);
                    reached.push(w);
                    next.push(w);
                }
            }
        }
        frontier = next;
        level += 1;
    }

    let mut paths = HashMap::with_capacity(reached.len());
    for target in reached {
        let mut path = Vec::new();
        let mut current = target;
        loop {
            if let Some(key) = graph.node_key(current) {
                path.push(key.clone());
            }
            match parent[current.index()] {
                Some(up) if up != current => current = up,
                _ => break,
            }
        }
        path.reverse();
        if let Some(key) = graph.node_key(target) {
            paths.insert(key.clone(), path);
        }
    }
    Ok(paths)
}

/// Returns hop distances between all pairs of nodes.
pub fn all_pairs_shortest_path_length<G: Successors>(
    graph: &G,
    cutoff: Option<usize>,
) -> HashMap<G::Node, HashMap<G::Node, usize>> {
    graph
        .node_ids()
        .filter_map(|id| {
            let key = graph.node_key(id)?;
            let lengths = single_source_shortest_path_length(graph, key, cutoff).ok()?;
            Some((key.clone(), lengths))
        })
        .collect()
}

/// Returns the weighted distance from `source` to every reachable node.
///
/// Edges without the `weight` attribute count as `1`.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`](crate::Error::NodeNotFound) if `source` is not in the
/// graph, and [`Error::InvalidArgument`](crate::Error::InvalidArgument) if a traversed
/// edge carries a non-numeric or negative weight.
pub fn single_source_dijkstra_path_length<G: Successors>(
    graph: &G,
    source: &G::Node,
    weight: &str,
) -> Result<HashMap<G::Node, f64>> {
    let start = lookup(graph, source)?;
    let counts = count_paths_weighted(graph, start, weight)?;
    Ok(counts
        .order
        .iter()
        .filter_map(|&id| Some((graph.node_key(id)?.clone(), counts.dist[id.index()]?)))
        .collect())
}

/// Returns one shortest weighted path from `source` to every reachable node.
///
/// # Errors
///
/// Same as [`single_source_dijkstra_path_length`].
pub fn single_source_dijkstra_path<G: Successors>(
    graph: &G,
    source: &G::Node,
    weight: &str,
) -> Result<HashMap<G::Node, Vec<G::Node>>> {
    let start = lookup(graph, source)?;
    let counts = count_paths_weighted(graph, start, weight)?;
    Ok(counts
        .order
        .iter()
        .filter_map(|&id| Some((graph.node_key(id)?.clone(), walk_back(graph, &counts, id))))
        .collect())
}

// The first recorded predecessor of a node is the one that set its final distance.
fn walk_back<G: GraphBase>(graph: &G, counts: &PathCounts, target: NodeId) -> Vec<G::Node> {
    let mut path = Vec::new();
    let mut current = target;
    loop {
        if let Some(key) = graph.node_key(current) {
            path.push(key.clone());
        }
        match counts.preds[current.index()].first() {
            Some(&up) => current = up,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Returns a shortest weighted path from `source` to `target`.
///
/// Edges without the `weight` attribute count as `1`.
///
/// # Errors
///
/// - [`Error::NodeNotFound`] if either endpoint is not in the graph
/// - [`Error::NoPath`] if `target` is unreachable
/// - [`Error::InvalidArgument`] for non-numeric or negative weights
pub fn dijkstra_path<G: Successors>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: &str,
) -> Result<Vec<G::Node>> {
    let start = lookup(graph, source)?;
    let end = lookup(graph, target)?;
    let counts = count_paths_weighted(graph, start, weight)?;
    if counts.dist[end.index()].is_none() {
        return Err(Error::no_path(source, target));
    }
    Ok(walk_back(graph, &counts, end))
}

/// Returns the weighted distance from `source` to `target`.
///
/// # Errors
///
/// Same as [`dijkstra_path`].
pub fn dijkstra_path_length<G: Successors>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: &str,
) -> Result<f64> {
    let start = lookup(graph, source)?;
    let end = lookup(graph, target)?;
    let counts = count_paths_weighted(graph, start, weight)?;
    counts.dist[end.index()].ok_or_else(|| Error::no_path(source, target))
}

/// Returns a shortest unweighted path from `source` to `target`.
///
/// Two BFS frontiers grow from both ends, always expanding the smaller one; the forward
/// frontier follows successors and the backward frontier predecessors.
///
/// # Errors
///
/// - [`Error::NodeNotFound`] if either endpoint is not in the graph
/// - [`Error::NoPath`] if `target` is unreachable
pub fn bidirectional_shortest_path<G: Successors + Predecessors>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
) -> Result<Vec<G::Node>> {
    let start = lookup(graph, source)?;
    let end = lookup(graph, target)?;

    // Each search marks its root as its own parent.
    let bound = graph.node_bound();
    let mut pred: Vec<Option<NodeId>> = vec![None; bound];
    let mut succ: Vec<Option<NodeId>> = vec![None; bound];
    pred[start.index()] = Some(start);
    succ[end.index()] = Some(end);

    let mut meeting = (start == end).then_some(start);
    let mut forward = vec![start];
    let mut backward = vec![end];

    'search: while meeting.is_none() && !forward.is_empty() && !backward.is_empty() {
        if forward.len() <= backward.len() {
            for v in std::mem::take(&mut forward) {
                for w in graph.successors(v) {
                    if pred[w.index()].is_none() {
                        pred[w.index()] = Some(v);
                        forward.push(w);
                    }
                    if succ[w.index()].is_some() {
                        meeting = Some(w);
                        break 'search;
                    }
                }
            }
        } else {
            for v in std::mem::take(&mut backward) {
                for w in graph.predecessors(v) {
                    if succ[w.index()].is_none() {
                        succ[w.index()] = Some(v);
                        backward.push(w);
                    }
                    if pred[w.index()].is_some() {
                        meeting = Some(w);
                        break 'search;
                    }
                }
            }
        }
    }

    let Some(meeting) = meeting else {
        return Err(Error::no_path(source, target));
    };

    let mut ids = vec![meeting];
    let mut current = meeting;
    while let Some(up) = pred[current.index()].filter(|&up| up != current) {
        ids.push(up);
        current = up;
    }
    ids.reverse();
    current = meeting;
    while let Some(down) = succ[current.index()].filter(|&down| down != current) {
        ids.push(down);
        current = down;
    }

    trace!(length = ids.len(), "bidirectional search met");
    Ok(ids.into_iter().filter_map(|id| graph.node_key(id).cloned()).collect())
}

/// Returns a shortest path from `source` to `target`, weighted when `weight` is given.
///
/// # Errors
///
/// Same as [`bidirectional_shortest_path`] and [`dijkstra_path`].
pub fn shortest_path<G: Successors + Predecessors>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: Option<&str>,
) -> Result<Vec<G::Node>> {
    match weight {
        None => bidirectional_shortest_path(graph, source, target),
        Some(weight) => dijkstra_path(graph, source, target, weight),
    }
}

/// Returns the length of a shortest path from `source` to `target`.
///
/// Without `weight` this is the hop count.
///
/// # Errors
///
/// Same as [`shortest_path`].
pub fn shortest_path_length<G: Successors + Predecessors>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: Option<&str>,
) -> Result<f64> {
    match weight {
        None => {
            let path = bidirectional_shortest_path(graph, source, target)?;
            Ok(path.len().saturating_sub(1) as f64)
        }
        Some(weight) => dijkstra_path_length(graph, source, target, weight),
    }
}

/// Returns `true` if `target` is reachable from `source`.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if either endpoint is not in the graph.
pub fn has_path<G: Successors + Predecessors>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
) -> Result<bool> {
    match bidirectional_shortest_path(graph, source, target) {
        Ok(_) => Ok(true),
        Err(Error::NoPath(_)) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Returns, for every node reached by a BFS from `source`, all of its predecessors on
/// shortest paths.
///
/// The source maps to an empty list. With `cutoff`, the search stops after that many
/// levels.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if `source` is not in the graph.
pub fn predecessor<G: Successors>(
    graph: &G,
    source: &G::Node,
    cutoff: Option<usize>,
) -> Result<HashMap<G::Node, Vec<G::Node>>> {
    let start = lookup(graph, source)?;
    let mut seen: Vec<Option<usize>> = vec![None; graph.node_bound()];
    let mut preds: Vec<Vec<NodeId>> = vec![Vec::new(); graph.node_bound()];
    let mut reached = vec![start];
    seen[start.index()] = Some(0);

    let mut level = 0;
    let mut next_level = vec![start];
    while !next_level.is_empty() {
        level += 1;
        for v in std::mem::take(&mut next_level) {
            for w in graph.successors(v) {
                match seen[w.index()] {
                    None => {
                        seen[w.index()] = Some(level);
                        preds[w.index()].push(v);
                        reached.push(w);
                        next_level.push(w);
                    }
                    Some(known) if known == level => preds[w.index()].push(v),
                    Some(_) => {}
                }
            }
        }
        if cutoff.is_some_and(|cutoff| cutoff <= level) {
            break;
        }
    }

    Ok(reached
        .into_iter()
        .filter_map(|id| {
            let key = graph.node_key(id)?.clone();
            let list = preds[id.index()]
                .iter()
                .filter_map(|&p| graph.node_key(p).cloned())
                .collect();
            Some((key, list))
        })
        .collect())
}
