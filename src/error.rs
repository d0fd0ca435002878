use thiserror::Error;

macro_rules! invalid_argument {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidArgument($msg.to_string())
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidArgument(format!($fmt, $($arg)*))
    };
}

macro_rules! not_implemented {
    ($msg:expr) => {
        crate::Error::NotImplemented($msg.to_string())
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::NotImplemented(format!($fmt, $($arg)*))
    };
}

macro_rules! unfeasible {
    ($msg:expr) => {
        crate::Error::Unfeasible($msg.to_string())
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Unfeasible(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Structural Errors
/// - [`Error::NodeNotFound`] - A node that was required to exist is missing
/// - [`Error::EdgeNotFound`] - An edge that was required to exist is missing
///
/// ## Argument Errors
/// - [`Error::InvalidArgument`] - Malformed option, keyword or input sequence
///
/// ## Algorithm Errors
/// - [`Error::NotImplemented`] - The algorithm is not defined for this kind of graph
/// - [`Error::Unfeasible`] - The requested ordering or structure cannot exist (e.g. a cycle
///   during topological sorting)
/// - [`Error::PointlessConcept`] - The question has no meaningful answer for the input
/// - [`Error::NoPath`] - Two nodes are not connected by any path
/// - [`Error::ConvergenceFailed`] - Power iteration ran out of iterations
///
/// Callers that need to react to cycles only should match on [`Error::Unfeasible`] (or use
/// [`Error::is_unfeasible`]) and propagate everything else.
///
/// # Examples
///
/// ```rust
/// use netgraph::{algorithms::dag::topological_sort, DiGraph, Error};
///
/// let mut graph: DiGraph<u32> = DiGraph::new();
/// graph.add_edge(1, 2);
/// graph.add_edge(2, 1);
///
/// match topological_sort(&graph, None) {
///     Err(Error::Unfeasible(message)) => println!("cycle: {message}"),
///     Err(other) => return Err(other),
///     Ok(order) => println!("{order:?}"),
/// }
/// # Ok::<(), netgraph::Error>(())
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The node is not present in the graph.
    ///
    /// Raised by strict single-element operations (`remove_node`, neighbor lookups,
    /// `nbunch` arguments naming unknown nodes). The payload is the `Debug` rendering
    /// of the node.
    #[error("The node {0} is not in the graph")]
    NodeNotFound(String),

    /// The edge is not present in the graph.
    ///
    /// Raised by [`Graph::remove_edge`](crate::Graph::remove_edge) and its directed
    /// counterpart. Bulk removal never raises this.
    #[error("The edge {0}-{1} is not in the graph")]
    EdgeNotFound(String, String),

    /// An argument was not acceptable.
    ///
    /// Examples are unknown ordering or method keywords, a sample size larger than the
    /// graph, non-numeric edge weights or a non-graphical degree sequence.
    #[error("{0}")]
    InvalidArgument(String),

    /// The operation is not defined for the kind of graph it was called on.
    ///
    /// For instance topological sorting and aperiodicity of undirected graphs.
    #[error("{0}")]
    NotImplemented(String),

    /// No solution exists for the input.
    ///
    /// Signals that a directed graph contains a cycle where an acyclic one is required,
    /// or that overlapping relabel mappings cannot be ordered.
    #[error("{0}")]
    Unfeasible(String),

    /// The question is meaningless for the input, e.g. aperiodicity of the null graph.
    #[error("{0}")]
    PointlessConcept(String),

    /// The target node cannot be reached from the source.
    #[error("{0}")]
    NoPath(String),

    /// An iterative method did not settle within its iteration budget.
    #[error("Power iteration failed to converge in {0} iterations")]
    ConvergenceFailed(usize),
}

impl Error {
    /// Returns `true` for the infeasibility signal raised on cycles.
    #[must_use]
    pub fn is_unfeasible(&self) -> bool {
        matches!(self, Error::Unfeasible(_))
    }

    pub(crate) fn node_not_found<N: std::fmt::Debug>(node: &N) -> Self {
        Error::NodeNotFound(format!("{node:?}"))
    }

    pub(crate) fn edge_not_found<N: std::fmt::Debug>(u: &N, v: &N) -> Self {
        Error::EdgeNotFound(format!("{u:?}"), format!("{v:?}"))
    }

    pub(crate) fn no_path<N: std::fmt::Debug>(source: &N, target: &N) -> Self {
        Error::NoPath(format!("Node {target:?} not reachable from {source:?}"))
    }
}

/// The result type used throughout netgraph.
pub type Result<T> = std::result::Result<T, Error>;
