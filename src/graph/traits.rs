//! Trait definitions for graph abstractions.
//!
//! Algorithms in [`crate::algorithms`] are written against these traits instead of the
//! concrete containers, so one implementation serves both [`Graph`](crate::Graph) and
//! [`DiGraph`](crate::DiGraph). Directedness is a runtime capability
//! ([`GraphBase::is_directed`]) because several algorithms accept both kinds and only
//! differ in how they rescale or whether they are defined at all.
//!
//! # Architecture
//!
//! - [`GraphBase`] - Node identity, counts and the capability flags
//! - [`Successors`] - Forward adjacency with access to the shared edge records
//! - [`Predecessors`] - Backward adjacency
//! - [`Build`] - Incremental construction, used by conversions, generators and relabeling
//!
//! For an undirected graph successors and predecessors are both the neighbor set.
//!
//! # Design Principles
//!
//! ## Ids Inside, Keys Outside
//!
//! Traversal speaks in [`NodeId`]s so that per-node state lives in dense vectors of
//! length [`GraphBase::node_bound`]. Keys are resolved once at the boundary with
//! [`GraphBase::node_id`] and [`GraphBase::node_key`].
//!
//! ## Iterator-Based Traversal
//!
//! Adjacency queries return iterators rather than collections. Both containers also
//! have key-based inherent methods named `successors` and `predecessors`; inherent
//! methods win method resolution, so code holding a concrete container reaches the
//! trait methods through a generic bound or the `Trait::method(&graph, ..)` form.

use crate::{
    graph::{Attrs, EdgeRecord, NodeId, NodeKey},
    Result,
};

/// Base trait providing core graph properties.
///
/// Every graph has a node type, a set of dense node identifiers and the two capability
/// flags the algorithms branch on.
///
/// # Required Methods
///
/// - [`node_count`](GraphBase::node_count) - Returns the number of nodes
/// - [`node_bound`](GraphBase::node_bound) - Returns the length of per-node scratch vectors
/// - [`node_ids`](GraphBase::node_ids) - Returns an iterator over all node ids
/// - [`node_id`](GraphBase::node_id) / [`node_key`](GraphBase::node_key) - Translate
///   between keys and ids
/// - [`is_directed`](GraphBase::is_directed) - Reports the edge kind
///
/// # Examples
///
/// ```rust
/// use netgraph::{graph::GraphBase, DiGraph, Graph};
///
/// fn describe<G: GraphBase>(graph: &G) -> (usize, bool) {
///     (graph.node_count(), graph.is_directed())
/// }
///
/// let mut graph: Graph<&str> = Graph::new();
/// graph.add_edge("A", "B");
/// assert_eq!(describe(&graph), (2, false));
///
/// let digraph: DiGraph<&str> = DiGraph::new();
/// assert_eq!(describe(&digraph), (0, true));
///
/// let id = GraphBase::node_id(&graph, &"B").unwrap();
/// assert_eq!(GraphBase::node_key(&graph, id), Some(&"B"));
/// ```
pub trait GraphBase {
    /// The caller-facing node type.
    type Node: NodeKey;

    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns one past the largest [`NodeId`] index in use.
    ///
    /// Per-node scratch vectors indexed by [`NodeId::index`] must have this length.
    /// It may exceed [`node_count`](GraphBase::node_count) after removals.
    fn node_bound(&self) -> usize;

    /// Returns an iterator over all node identifiers.
    ///
    /// # Returns
    ///
    /// The ids of the live nodes in insertion order.
    fn node_ids(&self) -> impl Iterator<Item = NodeId>;

    /// Looks up the identifier of a node key.
    ///
    /// # Arguments
    ///
    /// * `node` - The caller's node key
    ///
    /// # Returns
    ///
    /// The id of `node`, or `None` if it is not in the graph.
    fn node_id(&self, node: &Self::Node) -> Option<NodeId>;

    /// Returns the node key stored under an identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - A node id previously handed out by this graph
    ///
    /// # Returns
    ///
    /// The key of the node, or `None` if the id is stale or out of range.
    fn node_key(&self, id: NodeId) -> Option<&Self::Node>;

    /// Returns `true` if edges are directed.
    fn is_directed(&self) -> bool;

    /// Returns `true` if parallel edges are allowed.
    ///
    /// The containers of this crate are simple graphs, so this is always `false` for
    /// them. The flag is part of the capability set so that external multigraph types
    /// can describe themselves to the same algorithms.
    fn is_multigraph(&self) -> bool {
        false
    }

    /// Returns the attribute record of a node, if the graph keeps one.
    ///
    /// # Arguments
    ///
    /// * `_id` - The node whose record to return
    ///
    /// # Returns
    ///
    /// `None` by default; the containers return the node's record.
    fn node_record(&self, _id: NodeId) -> Option<&Attrs> {
        None
    }

    /// Returns the graph-level attribute record, if the graph keeps one.
    fn graph_record(&self) -> Option<&Attrs> {
        None
    }
}

/// Trait for graphs that support forward edge traversal.
///
/// Successor edges carry the shared [`EdgeRecord`] so that weighted algorithms can read
/// edge attributes without a second lookup.
///
/// # Required Methods
///
/// - [`successor_edges`](Successors::successor_edges) - Returns the out-edges of a node
/// - [`edge_record`](Successors::edge_record) - Looks up a single edge
/// - [`edge_ids`](Successors::edge_ids) - Returns every edge once
///
/// # Examples
///
/// ```rust
/// use netgraph::{graph::{GraphBase, Successors}, DiGraph};
///
/// fn out_degrees<G: Successors>(graph: &G) -> Vec<(G::Node, usize)> {
///     graph
///         .node_ids()
///         .filter_map(|id| Some((graph.node_key(id)?.clone(), graph.successors(id).count())))
///         .collect()
/// }
///
/// let mut graph: DiGraph<&str> = DiGraph::new();
/// graph.add_edges_from([("A", "B"), ("A", "C"), ("B", "C")]);
///
/// assert_eq!(out_degrees(&graph), vec![("A", 2), ("B", 1), ("C", 0)]);
/// assert_eq!(Successors::edge_ids(&graph).count(), 3);
/// ```
pub trait Successors: GraphBase {
    /// Returns an iterator over the successors of `node` together with the edge records.
    ///
    /// # Arguments
    ///
    /// * `node` - The node whose out-edges to iterate
    ///
    /// # Returns
    ///
    /// `(target, record)` pairs. For undirected graphs this is every neighbor. Unknown
    /// nodes yield nothing.
    fn successor_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &EdgeRecord)>;

    /// Returns an iterator over the successor nodes of the given node.
    ///
    /// # Arguments
    ///
    /// * `node` - The node whose successors to iterate
    ///
    /// # Returns
    ///
    /// The id of each successor, in the order of
    /// [`successor_edges`](Successors::successor_edges).
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.successor_edges(node).map(|(target, _)| target)
    }

    /// Returns the record of the edge `source -> target`, if present.
    ///
    /// # Arguments
    ///
    /// * `source` - Tail of the edge
    /// * `target` - Head of the edge
    ///
    /// # Returns
    ///
    /// The shared record, or `None` if there is no such edge. For undirected graphs
    /// both orientations return the same record.
    fn edge_record(&self, source: NodeId, target: NodeId) -> Option<&EdgeRecord>;

    /// Returns the edges of the graph as id pairs.
    ///
    /// Undirected edges are reported once, in the orientation in which the lower-id
    /// endpoint was first reached during node iteration.
    fn edge_ids(&self) -> impl Iterator<Item = (NodeId, NodeId)>;
}

/// Trait for graphs that support backward edge traversal.
///
/// # Required Methods
///
/// - [`predecessors`](Predecessors::predecessors) - Returns an iterator over predecessor nodes
///
/// # Examples
///
/// ```rust
/// use netgraph::{graph::{GraphBase, Predecessors}, DiGraph};
///
/// fn sources<G: Predecessors>(graph: &G) -> Vec<G::Node> {
///     graph
///         .node_ids()
///         .filter(|&id| graph.predecessors(id).next().is_none())
///         .filter_map(|id| graph.node_key(id).cloned())
///         .collect()
/// }
///
/// let mut graph: DiGraph<u32> = DiGraph::new();
/// graph.add_edges_from([(1, 3), (2, 3), (3, 4)]);
/// assert_eq!(sources(&graph), vec![1, 2]);
/// ```
pub trait Predecessors: GraphBase {
    /// Returns an iterator over the predecessor nodes of the given node.
    ///
    /// # Arguments
    ///
    /// * `node` - The node whose predecessors to iterate
    ///
    /// # Returns
    ///
    /// The id of each node with an edge into `node`. For undirected graphs this is
    /// every neighbor.
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs that can be grown (and shrunk) one node or edge at a time.
///
/// Adding an existing node or edge merges `attrs` into its record.
///
/// # Required Methods
///
/// - [`add_node_with`](Build::add_node_with) - Adds or updates a node
/// - [`add_edge_with`](Build::add_edge_with) - Adds or updates an edge
/// - [`remove_node`](Build::remove_node) - Removes a node and its edges
/// - [`graph_attrs_mut`](Build::graph_attrs_mut) - Gives access to graph attributes
///
/// # Examples
///
/// ```rust
/// use netgraph::{graph::{Attrs, Build, GraphBase}, DiGraph, Graph};
///
/// fn star<G: Build<Node = u32>>(leaves: u32) -> G {
///     let mut graph = G::default();
///     for leaf in 1..=leaves {
///         graph.add_edge_with(0, leaf, Attrs::new());
///     }
///     graph
/// }
///
/// let undirected: Graph<u32> = star(3);
/// assert_eq!(undirected.number_of_edges(), 3);
///
/// let mut directed: DiGraph<u32> = star(3);
/// Build::remove_node(&mut directed, &0)?;
/// assert_eq!(directed.node_count(), 3);
/// # Ok::<(), netgraph::Error>(())
/// ```
pub trait Build: GraphBase + Default {
    /// Adds a node, merging `attrs` into the record of an existing node.
    ///
    /// # Arguments
    ///
    /// * `node` - The node key
    /// * `attrs` - Attributes to store on the node
    fn add_node_with(&mut self, node: Self::Node, attrs: Attrs);

    /// Adds an edge and its endpoints, merging `attrs` into an existing edge record.
    ///
    /// # Arguments
    ///
    /// * `u` - Source endpoint
    /// * `v` - Target endpoint
    /// * `attrs` - Attributes to store on the edge
    fn add_edge_with(&mut self, u: Self::Node, v: Self::Node, attrs: Attrs);

    /// Removes a node together with its incident edges.
    ///
    /// # Arguments
    ///
    /// * `node` - The node to remove
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`](crate::Error::NodeNotFound) if the node is not in
    /// the graph.
    fn remove_node(&mut self, node: &Self::Node) -> Result<()>;

    /// Returns the graph-level attribute record for modification.
    fn graph_attrs_mut(&mut self) -> &mut Attrs;
}
