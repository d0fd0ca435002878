//! Node identity for graph containers.
//!
//! Graphs are keyed by caller-chosen node values (anything implementing [`NodeKey`]).
//! Internally each node is additionally assigned a [`NodeId`], a strongly-typed index
//! that algorithms use to size per-node scratch vectors and to iterate in a stable
//! order. Ids are handed out sequentially and never reused, so ascending id order is
//! node insertion order.

use std::{fmt, hash::Hash};

/// Bound for values usable as graph nodes.
///
/// Any `Clone + Eq + Hash + Debug` type qualifies through the blanket implementation:
/// integers, strings, tuples, or caller-defined identifiers. The `Debug` bound is only
/// used to render nodes in error messages.
///
/// # Examples
///
/// ```rust
/// use netgraph::Graph;
///
/// let mut ints: Graph<u32> = Graph::new();
/// ints.add_edge(1, 2);
///
/// let mut names: Graph<&str> = Graph::new();
/// names.add_edge("a", "b");
///
/// assert_eq!(ints.number_of_edges(), names.number_of_edges());
/// ```
pub trait NodeKey: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> NodeKey for T {}

/// A strongly-typed identifier for nodes within a graph.
///
/// `NodeId` wraps a `usize` index. Ids are assigned when a node is first inserted and
/// stay valid until the node is removed; a removed id is never handed out again.
/// Because of removals the ids of a graph are not necessarily dense, algorithms size
/// their scratch storage by [`GraphBase::node_bound`](crate::graph::GraphBase::node_bound)
/// rather than by the node count.
///
/// # Examples
///
/// ```rust
/// use netgraph::{graph::GraphBase, Graph};
///
/// let mut graph: Graph<&str> = Graph::new();
/// graph.add_node("A");
/// graph.add_node("B");
///
/// let a = graph.node_id(&"A").unwrap();
/// let b = graph.node_id(&"B").unwrap();
/// assert!(a < b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a new `NodeId` from a raw index value.
    ///
    /// This constructor is primarily intended for internal use and testing.
    /// Normal usage should obtain `NodeId` values from a graph.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw index value of this node identifier.
    ///
    /// The index can be used to index into vectors of length
    /// [`GraphBase::node_bound`](crate::graph::GraphBase::node_bound).
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(node: NodeId) -> Self {
        node.0
    }
}
