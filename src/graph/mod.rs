//! Graph containers and the contract the algorithms are written against.
//!
//! # Architecture
//!
//! - [`Graph`] - Undirected simple graph
//! - [`DiGraph`] - Directed simple graph with successor and predecessor maps
//! - [`GraphBase`], [`Successors`], [`Predecessors`] - Capability traits consumed by
//!   [`crate::algorithms`]
//! - [`Attrs`], [`AttrValue`], [`EdgeRecord`] - Attribute records
//! - [`convert`] - Building containers from edge lists, adjacency maps and other graphs
//! - [`functions`] - Graph-level helpers (density, degree histogram, attribute bulk access)
//!
//! Both containers store nodes in insertion order and hand out internal [`NodeId`]s to
//! algorithms. Callers normally never see ids; every public operation on the containers
//! speaks in terms of the caller's node type.

mod attrs;
mod directed;
mod node;
mod store;
mod traits;
mod undirected;

pub mod convert;
pub mod functions;

pub use attrs::{attrs, AttrValue, Attrs, EdgeRecord};
pub(crate) use attrs::numeric_attr;
pub use directed::DiGraph;
pub use node::{NodeId, NodeKey};
pub use traits::{Build, GraphBase, Predecessors, Successors};
pub use undirected::Graph;
