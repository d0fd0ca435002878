//! Node table shared by [`Graph`](crate::Graph) and [`DiGraph`](crate::DiGraph).
//!
//! The table maps caller node keys to [`NodeId`]s and owns one slot per node holding the
//! key, its attribute record and a container-specific adjacency payload `A`. Slots are
//! kept in a `BTreeMap` keyed by id so iteration always follows insertion order, even
//! after removals.

use std::collections::{BTreeMap, HashMap};

use crate::graph::{
    attrs::{Attrs, EdgeRecord},
    node::{NodeId, NodeKey},
};

/// Neighbor map of one node: neighbor id to the shared edge record.
pub(crate) type Neighbors = BTreeMap<NodeId, EdgeRecord>;

/// Storage for one node.
#[derive(Debug, Clone)]
pub(crate) struct Slot<N, A> {
    pub key: N,
    pub attrs: Attrs,
    pub adj: A,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeStore<N, A> {
    slots: BTreeMap<NodeId, Slot<N, A>>,
    index: HashMap<N, NodeId>,
    next_id: usize,
}

impl<N: NodeKey, A: Default> NodeStore<N, A> {
    pub fn new() -> Self {
        NodeStore {
            slots: BTreeMap::new(),
            index: HashMap::new(),
            next_id: 0,
        }
    }

    /// Inserts `key` if absent and merges `attrs` into its record.
    ///
    /// Returns the id of the node, new or existing.
    pub fn insert(&mut self, key: N, attrs: Attrs) -> NodeId {
        if let Some(&id) = self.index.get(&key) {
            if let Some(slot) = self.slots.get_mut(&id) {
                slot.attrs.extend(attrs);
            }
            return id;
        }

        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.index.insert(key.clone(), id);
        self.slots.insert(
            id,
            Slot {
                key,
                attrs,
                adj: A::default(),
            },
        );
        id
    }

    /// Returns the id of `key`, inserting it with an empty record when missing.
    pub fn ensure(&mut self, key: N) -> NodeId {
        match self.index.get(&key) {
            Some(&id) => id,
            None => self.insert(key, Attrs::new()),
        }
    }

    pub fn remove(&mut self, key: &N) -> Option<(NodeId, Slot<N, A>)> {
        let id = self.index.remove(key)?;
        self.slots.remove(&id).map(|slot| (id, slot))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    pub fn id(&self, key: &N) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn key(&self, id: NodeId) -> Option<&N> {
        self.slots.get(&id).map(|slot| &slot.key)
    }

    pub fn slot(&self, id: NodeId) -> Option<&Slot<N, A>> {
        self.slots.get(&id)
    }

    pub fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot<N, A>> {
        self.slots.get_mut(&id)
    }

    pub fn contains(&self, key: &N) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// One past the largest id ever assigned.
    pub fn bound(&self) -> usize {
        self.next_id
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.keys().copied()
    }

    pub fn slots(&self) -> impl Iterator<Item = (NodeId, &Slot<N, A>)> + '_ {
        self.slots.iter().map(|(&id, slot)| (id, slot))
    }

    pub fn keys(&self) -> impl Iterator<Item = &N> + '_ {
        self.slots.values().map(|slot| &slot.key)
    }
}
