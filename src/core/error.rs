//! Error handling logic

use std::fmt;

/// Unique identifier for a qubit within a route-selection circuit.
/// One qubit is allocated per candidate path, so within a single run the
/// id doubles as the path's position in the enumerated path list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qubit({})", self.0)
    }
}

/// Error types surfaced by the route-selection pipeline.
///
/// All of these are terminal for the run that triggers them: they indicate
/// a structurally invalid configuration (bad graph, bad node names, zero
/// repetitions) rather than a transient condition. The pipeline never
/// substitutes a default path index on error; skip-and-continue fallback
/// is a caller policy.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum RouteError {
    /// A node id was referenced that the graph does not contain.
    NodeNotFound {
        /// The missing node id.
        id: String,
    },

    /// An edge lookup missed: the two nodes are not directly connected.
    EdgeNotFound {
        /// One endpoint of the requested edge.
        a: String,
        /// The other endpoint of the requested edge.
        b: String,
    },

    /// Source and target exist but are disconnected.
    NoPath {
        /// The requested source node.
        source: String,
        /// The requested target node.
        target: String,
    },

    /// A run was attempted with zero candidate paths; a zero-qubit
    /// circuit cannot be built.
    NoPaths,

    /// The selector was handed a histogram with no observed outcomes
    /// (only possible when zero repetitions were sampled).
    EmptyHistogram,

    /// An operation or parameter is inconsistent with the current state
    /// or the pipeline's rules.
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// A downstream route sink (visualizer collaborator) failed.
    Render {
        /// Render failure message
        message: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NodeNotFound { id } => write!(f, "Node Not Found: {}", id),
            RouteError::EdgeNotFound { a, b } => write!(f, "Edge Not Found: ({}, {})", a, b),
            RouteError::NoPath { source, target } => {
                write!(f, "No Path: {} and {} are disconnected", source, target)
            }
            RouteError::NoPaths => write!(f, "No Paths: zero candidate paths for this run"),
            RouteError::EmptyHistogram => {
                write!(f, "Empty Histogram: no measurement outcomes were sampled")
            }
            RouteError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            RouteError::SimulationError { message } => {
                write!(f, "Simulation Process Error: {}", message)
            }
            RouteError::Render { message } => write!(f, "Render Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for RouteError {}
