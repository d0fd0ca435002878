// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # netgraph
//!
//! An in-memory graph library: undirected [`Graph`] and directed [`DiGraph`] simple
//! graphs with attribute records on the graph, its nodes and its edges, plus a set of
//! classic algorithms that run on both.
//!
//! ## Features
//!
//! - **Caller-chosen node values** - any `Clone + Eq + Hash + Debug` type is a node
//! - **Shared edge records** - both adjacency entries of an edge observe one record
//! - **Deterministic iteration** - nodes and neighbors follow insertion order
//! - **Shortest paths** - BFS, bidirectional BFS and Dijkstra, single source or point to point
//! - **Centrality** - Brandes betweenness for nodes and edges, eigenvector centrality
//! - **Clustering** - triangles, transitivity, square and weighted clustering
//! - **Maximal cliques** - lazy and recursive Bron–Kerbosch with pivoting
//! - **DAG analysis** - topological sorting, acyclicity and aperiodicity
//! - **Relabeling and degree sequences** - copy or in-place relabeling, Havel–Hakimi
//!   and Erdős–Gallai validation
//! - **Operators** - union, composition, intersection and differences of two graphs
//!
//! ## Quick Start
//!
//! ```rust
//! use netgraph::prelude::*;
//!
//! let mut graph: Graph<&str> = Graph::new();
//! graph.add_edges_from([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
//!
//! let scores = betweenness_centrality(&graph, &BetweennessConfig::default())?;
//! assert!(scores["c"] > scores["a"]);
//!
//! let largest = find_cliques(&graph).map(|clique| clique.len()).max();
//! assert_eq!(largest, Some(3));
//! # Ok::<(), netgraph::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`graph`] - The containers, their attribute model and the capability traits
//!   ([`GraphBase`](graph::GraphBase), [`Successors`](graph::Successors),
//!   [`Predecessors`](graph::Predecessors), [`Build`](graph::Build)) algorithms are
//!   written against
//! - [`algorithms`] - Shortest paths, centrality, clustering, cliques, DAG analysis,
//!   degree sequences, operators, matching and isomorphism checks
//! - [`relabel`] - Node relabeling
//! - [`generators`] - Deterministic graph generators
//!
//! Graphs are single-threaded: edge records are `Rc<RefCell<_>>`, so neither container
//! is `Send`. Algorithms borrow the graph immutably and return owned results keyed by
//! the caller's node values.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for algorithm summaries, `trace` for
//! per-source and per-clique detail) and never installs a subscriber itself.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use netgraph::prelude::*;
///
/// let graph: DiGraph<usize> = path_graph(4);
/// assert_eq!(topological_sort(&graph, None)?, vec![0, 1, 2, 3]);
/// # Ok::<(), netgraph::Error>(())
/// ```
pub mod prelude;

/// Graph containers, attribute records and capability traits.
///
/// # Key Types
///
/// - [`Graph`] - Undirected simple graph
/// - [`DiGraph`] - Directed simple graph
/// - [`AttrValue`], [`Attrs`], [`EdgeRecord`] - Attribute model
/// - [`graph::NodeId`] - Dense internal node identifier
///
/// # Submodules
///
/// - [`graph::convert`] - Building graphs from edge lists, adjacency lists and other graphs
/// - [`graph::functions`] - Density, degree histogram, attribute bulk access, summaries
pub mod graph;

/// Graph algorithms.
///
/// See the module documentation for the list of algorithms and their complexity.
pub mod algorithms;

pub mod generators;

pub mod relabel;

/// `netgraph` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub use error::Result;

/// `netgraph` Error type
///
/// The error type for all fallible operations in this crate.
///
/// # Examples
///
/// ```rust
/// use netgraph::{Error, Graph};
///
/// let mut graph: Graph<u32> = Graph::new();
/// match graph.remove_node(&7) {
///     Err(Error::NodeNotFound(node)) => println!("missing {node}"),
///     Err(e) => println!("Error: {e}"),
///     Ok(()) => unreachable!(),
/// }
/// ```
pub use error::Error;

pub use graph::{attrs, AttrValue, Attrs, DiGraph, EdgeRecord, Graph, NodeKey};
