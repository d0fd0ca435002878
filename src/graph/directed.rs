//! Directed simple graph.
//!
//! [`DiGraph`] keeps two neighbor maps per node: successors (out-edges) and
//! predecessors (in-edges). A directed edge `u -> v` is stored as `succ[u][v]` and
//! `pred[v][u]`, both holding the same [`EdgeRecord`].
//!
//! The type does not wrap or extend [`Graph`](crate::Graph); both containers share the
//! node table and implement the same capability traits, and the algorithms pick the
//! behavior through [`GraphBase::is_directed`].

use std::rc::Rc;

use tracing::trace;

use crate::{
    graph::{
        attrs::{new_record, AttrValue, Attrs, EdgeRecord},
        node::{NodeId, NodeKey},
        store::{Neighbors, NodeStore},
        traits::{Build, GraphBase, Predecessors, Successors},
        undirected::Graph,
    },
    Error, Result,
};

/// Per-node adjacency of a directed graph.
#[derive(Debug, Clone, Default)]
pub(crate) struct Links {
    succ: Neighbors,
    pred: Neighbors,
}

/// A directed graph with attribute records on the graph, nodes and edges.
///
/// `edges()` and neighbor queries default to out-edges / successors. Parallel edges
/// are not supported; self-loops are.
///
/// # Examples
///
/// ```rust
/// use netgraph::DiGraph;
///
/// let mut graph: DiGraph<&str> = DiGraph::new();
/// graph.add_edges_from([("a", "b"), ("a", "c"), ("c", "b")]);
///
/// assert_eq!(graph.out_degree(&"a")?, 2);
/// assert_eq!(graph.in_degree(&"b")?, 2);
/// assert_eq!(graph.predecessors(&"b")?.copied().collect::<Vec<_>>(), vec!["a", "c"]);
/// # Ok::<(), netgraph::Error>(())
/// ```
#[derive(Debug)]
pub struct DiGraph<N: NodeKey> {
    graph: Attrs,
    nodes: NodeStore<N, Links>,
}

impl<N: NodeKey> Default for DiGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> DiGraph<N> {
    /// Creates an empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        DiGraph {
            graph: Attrs::new(),
            nodes: NodeStore::new(),
        }
    }

    /// Creates an empty directed graph carrying a `name` graph attribute.
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

    /// Removes a node together with its in- and out-edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn remove_node(&mut self, n: &N) -> Result<()> {
        let (id, slot) = self.nodes.remove(n).ok_or_else(|| Error::node_not_found(n))?;
        for target in slot.adj.succ.keys() {
            if let Some(other) = self.nodes.slot_mut(*target) {
                other.adj.pred.remove(&id);
            }
        }
        for source in slot.adj.pred.keys() {
            if let Some(other) = self.nodes.slot_mut(*source) {
                other.adj.succ.remove(&id);
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

    /// Adds the edge `u -> v`, creating missing endpoints.
    pub fn add_edge(&mut self, u: N, v: N) {
        self.add_edge_with(u, v, Attrs::new());
    }

    /// Adds the edge `u -> v` and merges `attrs` into its shared record.
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: Attrs) {
        let uid = self.nodes.ensure(u);
        let vid = self.nodes.ensure(v);

        let existing = self
            .nodes
            .slot(uid)
            .and_then(|slot| slot.adj.succ.get(&vid))
            .map(Rc::clone);
        let record = match existing {
            Some(record) => {
                record.borrow_mut().extend(attrs);
                record
            }
            None => new_record(attrs),
        };

        if let Some(slot) = self.nodes.slot_mut(uid) {
            slot.adj.succ.insert(vid, Rc::clone(&record));
        }
        if let Some(slot) = self.nodes.slot_mut(vid) {
            slot.adj.pred.insert(uid, record);
        }
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

    /// Removes the edge `u -> v`.
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
            .and_then(|slot| slot.adj.succ.remove(&vid))
            .is_some();
        if !removed {
            return Err(Error::edge_not_found(u, v));
        }
        if let Some(slot) = self.nodes.slot_mut(vid) {
            slot.adj.pred.remove(&uid);
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

    /// Returns `true` if the edge `u -> v` exists.
    #[must_use]
    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.edge_data(u, v).is_some()
    }

    /// Returns `true` if `v` is a successor of `u`.
    #[must_use]
    pub fn has_successor(&self, u: &N, v: &N) -> bool {
        self.has_edge(u, v)
    }

    /// Returns `true` if `v` is a predecessor of `u`.
    #[must_use]
    pub fn has_predecessor(&self, u: &N, v: &N) -> bool {
        self.has_edge(v, u)
    }

    /// Returns the shared record of the edge `u -> v`.
    #[must_use]
    pub fn edge_data(&self, u: &N, v: &N) -> Option<EdgeRecord> {
        let uid = self.nodes.id(u)?;
        let vid = self.nodes.id(v)?;
        self.nodes.slot(uid)?.adj.succ.get(&vid).map(Rc::clone)
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

    fn links(&self, n: &N) -> Result<&Links> {
        self.nodes
            .id(n)
            .and_then(|id| self.nodes.slot(id))
            .map(|slot| &slot.adj)
            .ok_or_else(|| Error::node_not_found(n))
    }

    fn keyed<'a>(&'a self, map: &'a Neighbors) -> impl Iterator<Item = (&'a N, &'a EdgeRecord)> + 'a {
        map.iter()
            .filter_map(move |(id, record)| self.nodes.key(*id).map(|key| (key, record)))
    }

    /// Iterates over the successors of `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn successors(&self, n: &N) -> Result<impl Iterator<Item = &N> + '_> {
        let links = self.links(n)?;
        Ok(self.keyed(&links.succ).map(|(key, _)| key))
    }

    /// Iterates over the predecessors of `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn predecessors(&self, n: &N) -> Result<impl Iterator<Item = &N> + '_> {
        let links = self.links(n)?;
        Ok(self.keyed(&links.pred).map(|(key, _)| key))
    }

    /// Same as [`successors`](Self::successors).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn neighbors(&self, n: &N) -> Result<impl Iterator<Item = &N> + '_> {
        self.successors(n)
    }

    /// Iterates over `(successor, record)` pairs of `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn adjacency(&self, n: &N) -> Result<impl Iterator<Item = (&N, &EdgeRecord)> + '_> {
        let links = self.links(n)?;
        Ok(self.keyed(&links.succ))
    }

    /// Returns the out-edges of `nbunch` (or of all nodes).
    ///
    /// Nodes of `nbunch` that are not in the graph are ignored.
    #[must_use]
    pub fn edges(&self, nbunch: Option<&[N]>) -> Vec<(N, N)> {
        self.out_edges(nbunch)
    }

    /// Like [`edges`](Self::edges), with the shared edge records.
    #[must_use]
    pub fn edges_with_data(&self, nbunch: Option<&[N]>) -> Vec<(N, N, EdgeRecord)> {
        let mut edges = Vec::new();
        for id in self.bunch_ids(nbunch) {
            let Some(slot) = self.nodes.slot(id) else {
                continue;
            };
            for (target, record) in self.keyed(&slot.adj.succ) {
                edges.push((slot.key.clone(), target.clone(), Rc::clone(record)));
            }
        }
        edges
    }

    /// Returns the edges leaving `nbunch` (or all edges).
    #[must_use]
    pub fn out_edges(&self, nbunch: Option<&[N]>) -> Vec<(N, N)> {
        self.edges_with_data(nbunch)
            .into_iter()
            .map(|(u, v, _)| (u, v))
            .collect()
    }

    /// Returns the edges entering `nbunch` (or all edges, grouped by target).
    #[must_use]
    pub fn in_edges(&self, nbunch: Option<&[N]>) -> Vec<(N, N)> {
        let mut edges = Vec::new();
        for id in self.bunch_ids(nbunch) {
            let Some(slot) = self.nodes.slot(id) else {
                continue;
            };
            for (source, _) in self.keyed(&slot.adj.pred) {
                edges.push((source.clone(), slot.key.clone()));
            }
        }
        edges
    }

    fn bunch_ids(&self, nbunch: Option<&[N]>) -> Vec<NodeId> {
        match nbunch {
            None => self.nodes.ids().collect(),
            Some(bunch) => bunch.iter().filter_map(|n| self.nodes.id(n)).collect(),
        }
    }

    /// Returns the number of edges entering `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn in_degree(&self, n: &N) -> Result<usize> {
        Ok(self.links(n)?.pred.len())
    }

    /// Returns the number of edges leaving `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn out_degree(&self, n: &N) -> Result<usize> {
        Ok(self.links(n)?.succ.len())
    }

    /// Returns in-degree plus out-degree of `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `n` is not in the graph.
    pub fn degree(&self, n: &N) -> Result<usize> {
        let links = self.links(n)?;
        Ok(links.succ.len() + links.pred.len())
    }

    /// Returns `(node, degree)` for every node in insertion order.
    #[must_use]
    pub fn degrees(&self) -> Vec<(N, usize)> {
        self.nodes
            .slots()
            .map(|(_, slot)| (slot.key.clone(), slot.adj.succ.len() + slot.adj.pred.len()))
            .collect()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.nodes.slots().map(|(_, slot)| slot.adj.succ.len()).sum()
    }

    /// Returns `1` if the edge `u -> v` exists, `0` otherwise.
    #[must_use]
    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        usize::from(self.has_edge(u, v))
    }

    /// Returns the nodes carrying a self-loop.
    #[must_use]
    pub fn nodes_with_selfloops(&self) -> Vec<N> {
        self.nodes
            .slots()
            .filter(|(id, slot)| slot.adj.succ.contains_key(id))
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
    pub fn subgraph(&self, nbunch: &[N]) -> DiGraph<N> {
        let mut sub = DiGraph::new();
        sub.graph = self.graph.clone();
        for n in nbunch {
            if let Some(attrs) = self.node_attrs(n) {
                sub.add_node_with(n.clone(), attrs.clone());
            }
        }

        for (u, v, record) in self.edges_with_data(Some(nbunch)) {
            let (Some(uid), Some(vid)) = (sub.nodes.id(&u), sub.nodes.id(&v)) else {
                continue;
            };
            if let Some(slot) = sub.nodes.slot_mut(uid) {
                slot.adj.succ.insert(vid, Rc::clone(&record));
            }
            if let Some(slot) = sub.nodes.slot_mut(vid) {
                slot.adj.pred.insert(uid, record);
            }
        }
        trace!(nodes = sub.number_of_nodes(), "built induced subgraph");
        sub
    }

    /// Returns a deep copy: no record is shared between the two graphs.
    #[must_use]
    pub fn copy(&self) -> DiGraph<N> {
        let mut copy = DiGraph::new();
        copy.graph = self.graph.clone();
        copy.add_nodes_with_attrs_from(self.nodes_with_data().map(|(n, a)| (n.clone(), a.clone())));
        for (u, v, record) in self.edges_with_data(None) {
            let data = record.borrow().clone();
            copy.add_edge_with(u, v, data);
        }
        copy
    }

    /// Returns a copy with every edge reversed.
    #[must_use]
    pub fn reverse(&self) -> DiGraph<N> {
        let mut reversed = DiGraph::new();
        reversed.graph = self.graph.clone();
        reversed.add_nodes_with_attrs_from(
            self.nodes_with_data().map(|(n, a)| (n.clone(), a.clone())),
        );
        for (u, v, record) in self.edges_with_data(None) {
            let data = record.borrow().clone();
            reversed.add_edge_with(v, u, data);
        }
        reversed
    }

    /// Returns an undirected copy of this graph.
    ///
    /// With `reciprocal` set, only edges present in both directions are kept. When both
    /// orientations exist their attributes are merged into one record, the later
    /// orientation in iteration order winning on conflicts.
    #[must_use]
    pub fn to_undirected(&self, reciprocal: bool) -> Graph<N> {
        let mut undirected = Graph::new();
        *undirected.graph_attrs_mut() = self.graph.clone();
        undirected.add_nodes_with_attrs_from(
            self.nodes_with_data().map(|(n, a)| (n.clone(), a.clone())),
        );
        for (id, slot) in self.nodes.slots() {
            for (target, record) in &slot.adj.succ {
                if reciprocal && !slot.adj.pred.contains_key(target) {
                    continue;
                }
                if let (Some(u), Some(v)) = (self.nodes.key(id), self.nodes.key(*target)) {
                    undirected.add_edge_with(u.clone(), v.clone(), record.borrow().clone());
                }
            }
        }
        undirected
    }
}

impl<N: NodeKey> GraphBase for DiGraph<N> {
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
        true
    }
}

impl<N: NodeKey> Successors for DiGraph<N> {
    fn successor_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &EdgeRecord)> {
        self.nodes
            .slot(node)
            .into_iter()
            .flat_map(|slot| slot.adj.succ.iter().map(|(id, record)| (*id, record)))
    }

    fn edge_record(&self, source: NodeId, target: NodeId) -> Option<&EdgeRecord> {
        self.nodes.slot(source)?.adj.succ.get(&target)
    }

    fn edge_ids(&self) -> impl Iterator<Item = (NodeId, NodeId)> {
        self.nodes
            .slots()
            .flat_map(|(id, slot)| slot.adj.succ.keys().map(move |target| (id, *target)))
    }
}

impl<N: NodeKey> Predecessors for DiGraph<N> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.nodes
            .slot(node)
            .into_iter()
            .flat_map(|slot| slot.adj.pred.keys().copied())
    }
}

impl<N: NodeKey> Build for DiGraph<N> {
    fn add_node_with(&mut self, node: N, attrs: Attrs) {
        DiGraph::add_node_with(self, node, attrs);
    }

    fn add_edge_with(&mut self, u: N, v: N, attrs: Attrs) {
        DiGraph::add_edge_with(self, u, v, attrs);
    }

    fn remove_node(&mut self, node: &N) -> Result<()> {
        DiGraph::remove_node(self, node)
    }

    fn graph_attrs_mut(&mut self) -> &mut Attrs {
        &mut self.graph
    }
}
