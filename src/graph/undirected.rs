//! Undirected simple graph.
//!
//! [`Graph`] stores one neighbor map per node. An edge `{u, v}` is represented by two
//! adjacency entries, `u -> v` and `v -> u`, both pointing at the same [`EdgeRecord`].
//! A self-loop is a single entry `u -> u`.

use std::rc::Rc;

use tracing::trace;

use crate::{
    graph::{
        attrs::{new_record, numeric_attr, AttrValue, Attrs, EdgeRecord},
        directed::DiGraph,
        node::{NodeId, NodeKey},
        store::{Neighbors, NodeStore},
        traits::{Build, GraphBase, Predecessors, Successors},
    },
    Error, Result,
};

/// An undirected graph with attribute records on the graph, nodes and edges.
///
/// Nodes are arbitrary [`NodeKey`] values; parallel edges are not supported (adding an
/// existing edge updates its record). Iteration over nodes and neighbors follows node
/// insertion order.
///
/// # Examples
///
/// ```rust
/// use netgraph::{attrs, AttrValue, Graph};
///
/// let mut graph: Graph<u32> = Graph::new();
/// graph.add_edge(1, 2);
/// graph.add_edge_with(2, 3, attrs([("weight", AttrValue::from(4.0))]));
///
/// assert_eq!(graph.number_of_nodes(), 3);
/// assert_eq!(graph.number_of_edges(), 2);
/// assert_eq!(graph.degree(&2)?, 2);
///
/// // Both orientations observe the same edge record
/// graph.edge_data(&3, &2).unwrap().borrow_mut().insert("color".into(), "red".into());
/// assert!(graph.edge_data(&2, &3).unwrap().borrow().contains_key("color"));
/// # Ok::<(), netgraph::Error>(())
/// ```
#[derive(Debug)]
pub struct Graph<N: NodeKey> {
    graph: Attrs,
    nodes: NodeStore<N, Neighbors>,
}

impl<N: NodeKey> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> Graph<N> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Graph {
            graph: Attrs::new(),
            nodes: NodeStore::new(),
        }
    }

    /// Creates an empty graph carrying a `name` graph attribute.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut graph = Self::new();
        graph.set_name(name);
        graph
    }

    /// Returns the `name` graph attribute, or an empty string.
    #[must_use]
    pub fn name(&self) -> &str {
        self.graph
            .get("name")
            .and_then(AttrValue::as_str)
            .unwrap_or("")
    }

    /// Sets the `name` graph attribute.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.graph
            .insert("name".to_string(), AttrValue::Str(name.into()));
    }

    /// Returns the graph-level attribute record.
    #[must_use]
    pub fn graph_attrs(&self) -> &Attrs {
        &self.graph
    }

    /// Returns the graph-level attribute record for modification.
    pub fn graph_attrs_mut(&mut self) -> &mut Attrs {
        &mut self.graph
    }

    /// Adds a node without attributes. Adding an existing node is a no-op.
    pub fn add_node(&mut self, n: N) {
        self.nodes.insert(n, Attrs::new());
    }

    /// Adds a node, merging `attrs` into its record if it already exists.
    pub fn add_node_with(&mut self, n: N, attrs: Attrs) {
        self.nodes.insert(n, attrs);
    }

    /// Adds every node of `nodes`.
    pub fn add_nodes_from<I: IntoIterator<Item = N>>(&mut self, nodes: I) {
        for n in nodes {
            self.nodes.insert(n, Attrs::new());
        }
    }

    /// Adds `(node, attrs)` pairs, merging into existing records.
    pub fn add_nodes_with_attrs_from<I: IntoIterator<Item = (N, Attrs)>>(&mut self, nodes: I) {
        for (n, attrs) in nodes {
            self.nodes.insert(n, attrs);
        }
    }

    /// Removes a node and all incident edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn remove_node(&mut self, n: &N) -> Result<()> {
        let (id, slot) = self.nodes.remove(n).ok_or_else(|| Error::node_not_found(n))?;
        for nbr in slot.adj.keys() {
            if let Some(other) = self.nodes.slot_mut(*nbr) {
                other.adj.remove(&id);
            }
        }
        Ok(())
    }

    /// Removes every listed node that exists; unknown nodes are skipped.
    pub fn remove_nodes_from<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        for n in nodes {
            let _ = self.remove_node(n);
        }
    }

    /// Adds the edge `{u, v}`, creating missing endpoints.
    pub fn add_edge(&mut self, u: N, v: N) {
        self.add_edge_with(u, v, Attrs::new());
    }

    /// Adds the edge `{u, v}` and merges `attrs` into its shared record.
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: Attrs) {
        let uid = self.nodes.ensure(u);
        let vid = self.nodes.ensure(v);
        self.link(uid, vid, attrs);
    }

    /// Adds every `(u, v)` pair of `edges`.
    pub fn add_edges_from<I: IntoIterator<Item = (N, N)>>(&mut self, edges: I) {
        for (u, v) in edges {
            self.add_edge(u, v);
        }
    }

    /// Adds every `(u, v, attrs)` triple of `edges`.
    pub fn add_edges_with_attrs_from<I: IntoIterator<Item = (N, N, Attrs)>>(&mut self, edges: I) {
        for (u, v, attrs) in edges {
            self.add_edge_with(u, v, attrs);
        }
    }

    /// Adds `(u, v, w)` triples, storing `w` under the attribute `weight`.
    pub fn add_weighted_edges_from<I>(&mut self, edges: I, weight: &str)
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        for (u, v, w) in edges {
            let mut data = Attrs::new();
            data.insert(weight.to_string(), AttrValue::Float(w));
            self.add_edge_with(u, v, data);
        }
    }

    /// Removes the edge `{u, v}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge does not exist.
    pub fn remove_edge(&mut self, u: &N, v: &N) -> Result<()> {
        let (Some(uid), Some(vid)) = (self.nodes.id(u), self.nodes.id(v)) else {
            return Err(Error::edge_not_found(u, v));
        };
        let removed = self
            .nodes
            .slot_mut(uid)
            .and_then(|slot| slot.adj.remove(&vid))
            .is_some();
        if !removed {
            return Err(Error::edge_not_found(u, v));
        }
        if uid != vid {
            if let Some(slot) = self.nodes.slot_mut(vid) {
                slot.adj.remove(&uid);
            }
        }
        Ok(())
    }

    /// Removes every listed edge that exists; unknown edges are skipped.
    pub fn remove_edges_from<I: IntoIterator<Item = (N, N)>>(&mut self, edges: I) {
        for (u, v) in edges {
            let _ = self.remove_edge(&u, &v);
        }
    }

    /// Removes all nodes, edges and graph attributes.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.nodes.clear();
    }

    /// Returns `true` if `n` is a node of the graph.
    #[must_use]
    pub fn has_node(&self, n: &N) -> bool {
        self.nodes.contains(n)
    }

    /// Returns `true` if the edge `{u, v}` exists.
    #[must_use]
    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.edge_data(u, v).is_some()
    }

    /// Returns the shared record of the edge `{u, v}`.
    #[must_use]
    pub fn edge_data(&self, u: &N, v: &N) -> Option<EdgeRecord> {
        let uid = self.nodes.id(u)?;
        let vid = self.nodes.id(v)?;
        self.nodes.slot(uid)?.adj.get(&vid).map(Rc::clone)
    }

    /// Returns the live attribute record of a node.
    #[must_use]
    pub fn node_attrs(&self, n: &N) -> Option<&Attrs> {
        let id = self.nodes.id(n)?;
        self.nodes.slot(id).map(|slot| &slot.attrs)
    }

    /// Returns the live attribute record of a node for modification.
    pub fn node_attrs_mut(&mut self, n: &N) -> Option<&mut Attrs> {
        let id = self.nodes.id(n)?;
        self.nodes.slot_mut(id).map(|slot| &mut slot.attrs)
    }

    /// Iterates over the nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.keys()
    }

    /// Iterates over `(node, attrs)` pairs in insertion order.
    pub fn nodes_with_data(&self) -> impl Iterator<Item = (&N, &Attrs)> + '_ {
        self.nodes.slots().map(|(_, slot)| (&slot.key, &slot.attrs))
    }

    /// Iterates over the neighbors of `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn neighbors(&self, n: &N) -> Result<impl Iterator<Item = &N> + '_> {
        Ok(self.adjacency(n)?.map(|(nbr, _)| nbr))
    }

    /// Iterates over `(neighbor, record)` pairs of `n`: the adjacency view of one node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn adjacency(&self, n: &N) -> Result<impl Iterator<Item = (&N, &EdgeRecord)> + '_> {
        let slot = self
            .nodes
            .id(n)
            .and_then(|id| self.nodes.slot(id))
            .ok_or_else(|| Error::node_not_found(n))?;
        Ok(slot
            .adj
            .iter()
            .filter_map(move |(id, record)| self.nodes.key(*id).map(|key| (key, record))))
    }

    /// Returns the edges incident to `nbunch` (or all edges), each undirected edge once.
    ///
    /// Nodes of `nbunch` that are not in the graph are ignored.
    #[must_use]
    pub fn edges(&self, nbunch: Option<&[N]>) -> Vec<(N, N)> {
        self.edges_with_data(nbunch)
            .into_iter()
            .map(|(u, v, _)| (u, v))
            .collect()
    }

    /// Like [`edges`](Self::edges), with the shared edge records.
    #[must_use]
    pub fn edges_with_data(&self, nbunch: Option<&[N]>) -> Vec<(N, N, EdgeRecord)> {
        let sources: Vec<NodeId> = match nbunch {
            None => self.nodes.ids().collect(),
            Some(bunch) => bunch.iter().filter_map(|n| self.nodes.id(n)).collect(),
        };

        let mut seen = vec![false; self.nodes.bound()];
        let mut edges = Vec::new();
        for id in sources {
            let Some(slot) = self.nodes.slot(id) else {
                continue;
            };
            for (nbr, record) in &slot.adj {
                if seen[nbr.index()] {
                    continue;
                }
                if let Some(key) = self.nodes.key(*nbr) {
                    edges.push((slot.key.clone(), key.clone(), Rc::clone(record)));
                }
            }
            seen[id.index()] = true;
        }
        edges
    }

    /// Returns the degree of `n`; a self-loop counts twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn degree(&self, n: &N) -> Result<usize> {
        let id = self.nodes.id(n).ok_or_else(|| Error::node_not_found(n))?;
        Ok(self.degree_of(id))
    }

    /// Returns the sum of the `weight` attribute over the edges of `n`.
    ///
    /// Edges without the attribute count as `1`; a self-loop counts twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is missing and [`Error::InvalidArgument`]
    /// if an edge carries a non-numeric `weight`.
    pub fn weighted_degree(&self, n: &N, weight: &str) -> Result<f64> {
        let id = self.nodes.id(n).ok_or_else(|| Error::node_not_found(n))?;
        let mut total = 0.0;
        for (nbr, record) in self.successor_edges(id) {
            let w = numeric_attr(record, weight)
                .ok_or_else(|| invalid_argument!("edge attribute '{}' is not numeric", weight))?;
            total += if nbr == id { 2.0 * w } else { w };
        }
        Ok(total)
    }

    /// Returns `(node, degree)` for every node in insertion order.
    #[must_use]
    pub fn degrees(&self) -> Vec<(N, usize)> {
        self.nodes
            .slots()
            .map(|(id, slot)| (slot.key.clone(), self.degree_of(id)))
            .collect()
    }

    fn degree_of(&self, id: NodeId) -> usize {
        self.nodes.slot(id).map_or(0, |slot| {
            slot.adj.len() + usize::from(slot.adj.contains_key(&id))
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        let total: usize = self.nodes.ids().map(|id| self.degree_of(id)).sum();
        total / 2
    }

    /// Returns `1` if the edge `{u, v}` exists, `0` otherwise.
    #[must_use]
    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        usize::from(self.has_edge(u, v))
    }

    /// Returns the nodes carrying a self-loop.
    #[must_use]
    pub fn nodes_with_selfloops(&self) -> Vec<N> {
        self.nodes
            .slots()
            .filter(|(id, slot)| slot.adj.contains_key(id))
            .map(|(_, slot)| slot.key.clone())
            .collect()
    }

    /// Returns the self-loop edges as `(n, n)` pairs.
    #[must_use]
    pub fn selfloop_edges(&self) -> Vec<(N, N)> {
        self.nodes_with_selfloops()
            .into_iter()
            .map(|n| (n.clone(), n))
            .collect()
    }

    /// Returns the number of self-loops.
    #[must_use]
    pub fn number_of_selfloops(&self) -> usize {
        self.nodes_with_selfloops().len()
    }

    /// Returns the subgraph induced by `nbunch`.
    ///
    /// Edge records are shared with this graph; node attribute records and graph
    /// attributes are copied. Nodes of `nbunch` that are not in the graph are ignored.
    #[must_use]
    pub fn subgraph(&self, nbunch: &[N]) -> Graph<N> {
        let mut sub = Graph::new();
        sub.graph = self.graph.clone();
        for n in nbunch {
            if let Some(attrs) = self.node_attrs(n) {
                sub.add_node_with(n.clone(), attrs.clone());
            }
        }

        let ids: Vec<NodeId> = sub.nodes.ids().collect();
        for sid in ids {
            let Some(key) = sub.nodes.key(sid).cloned() else {
                continue;
            };
            let Some(oid) = self.nodes.id(&key) else {
                continue;
            };
            let Some(slot) = self.nodes.slot(oid) else {
                continue;
            };
            for (nbr, record) in &slot.adj {
                let Some(nbr_key) = self.nodes.key(*nbr) else {
                    continue;
                };
                if let Some(target) = sub.nodes.id(nbr_key) {
                    if let Some(sub_slot) = sub.nodes.slot_mut(sid) {
                        sub_slot.adj.insert(target, Rc::clone(record));
                    }
                }
            }
        }
        trace!(nodes = sub.number_of_nodes(), "built induced subgraph");
        sub
    }

    /// Returns a deep copy: no record is shared between the two graphs.
    #[must_use]
    pub fn copy(&self) -> Graph<N> {
        let mut copy = Graph::new();
        copy.graph = self.graph.clone();
        copy.add_nodes_with_attrs_from(self.nodes_with_data().map(|(n, a)| (n.clone(), a.clone())));
        for (u, v, record) in self.edges_with_data(None) {
            let data = record.borrow().clone();
            copy.add_edge_with(u, v, data);
        }
        copy
    }

    /// Returns a directed graph with both orientations of every edge.
    ///
    /// Each orientation receives its own copy of the edge record.
    #[must_use]
    pub fn to_directed(&self) -> DiGraph<N> {
        let mut directed = DiGraph::new();
        *directed.graph_attrs_mut() = self.graph.clone();
        directed.add_nodes_with_attrs_from(
            self.nodes_with_data().map(|(n, a)| (n.clone(), a.clone())),
        );
        for (id, slot) in self.nodes.slots() {
            for (nbr, record) in &slot.adj {
                if let (Some(u), Some(v)) = (self.nodes.key(id), self.nodes.key(*nbr)) {
                    directed.add_edge_with(u.clone(), v.clone(), record.borrow().clone());
                }
            }
        }
        directed
    }

    /// Connects two existing node ids, merging `attrs` into the shared record.
    fn link(&mut self, uid: NodeId, vid: NodeId, attrs: Attrs) {
        let existing = self
            .nodes
            .slot(uid)
            .and_then(|slot| slot.adj.get(&vid))
            .map(Rc::clone);

        let record = match existing {
            Some(record) => {
                record.borrow_mut().extend(attrs);
                record
            }
            None => new_record(attrs),
        };

        if let Some(slot) = self.nodes.slot_mut(uid) {
            slot.adj.insert(vid, Rc::clone(&record));
        }
        if let Some(slot) = self.nodes.slot_mut(vid) {
            slot.adj.insert(uid, record);
        }
    }
}

impl<N: NodeKey> GraphBase for Graph<N> {
    type Node = N;

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_bound(&self) -> usize {
        self.nodes.bound()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.nodes.ids()
    }

    fn node_id(&self, node: &N) -> Option<NodeId> {
        self.nodes.id(node)
    }

    fn node_key(&self, id: NodeId) -> Option<&N> {
        self.nodes.key(id)
    }

    fn node_record(&self, id: NodeId) -> Option<&Attrs> {
        self.nodes.slot(id).map(|slot| &slot.attrs)
    }

    fn graph_record(&self) -> Option<&Attrs> {
        Some(&self.graph)
    }

    fn is_directed(&self) -> bool {
        false
    }
}

impl<N: NodeKey> Successors for Graph<N> {
    fn successor_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &EdgeRecord)> {
        self.nodes
            .slot(node)
            .into_iter()
            .flat_map(|slot| slot.adj.iter().map(|(id, record)| (*id, record)))
    }

    fn edge_record(&self, source: NodeId, target: NodeId) -> Option<&EdgeRecord> {
        self.nodes.slot(source)?.adj.get(&target)
    }

    fn edge_ids(&self) -> impl Iterator<Item = (NodeId, NodeId)> {
        let mut seen = vec![false; self.nodes.bound()];
        let mut pairs = Vec::new();
        for (id, slot) in self.nodes.slots() {
            for nbr in slot.adj.keys() {
                if !seen[nbr.index()] {
                    pairs.push((id, *nbr));
                }
            }
            seen[id.index()] = true;
        }
        pairs.into_iter()
    }
}

impl<N: NodeKey> Predecessors for Graph<N> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.successors(node)
    }
}

impl<N: NodeKey> Build for Graph<N> {
    fn add_node_with(&mut self, node: N, attrs: Attrs) {
        Graph::add_node_with(self, node, attrs);
    }

    fn add_edge_with(&mut self, u: N, v: N, attrs: Attrs) {
        Graph::add_edge_with(self, u, v, attrs);
    }

    fn remove_node(&mut self, node: &N) -> Result<()> {
        Graph::remove_node(self, node)
    }

    fn graph_attrs_mut(&mut self) -> &mut Attrs {
        &mut self.graph
    }
}
