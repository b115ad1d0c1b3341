//! Error types for graph construction and lookup.

use thiserror::Error;

use crate::graph::NodeId;

/// Result type alias for fallible graph and simulator operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Everything that can go wrong while building or querying a spin graph.
///
/// Construction errors leave the graph in its pre-call state; the caller is
/// expected to fix the topology and retry at the call site.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// A node may never couple to itself.
    #[error("node {0} cannot be coupled to itself")]
    SelfLoop(NodeId),

    /// At most one bond may exist between two nodes, in either orientation.
    #[error("nodes {0} and {1} are already coupled")]
    DuplicateEdge(NodeId, NodeId),

    /// The handle does not belong to this graph.
    #[error("node {0} is not a member of this graph")]
    UnknownNode(NodeId),
}

impl GraphError {
    /// True for invariant violations raised while building topology.
    pub fn is_construction(&self) -> bool {
        matches!(self, GraphError::SelfLoop(_) | GraphError::DuplicateEdge(..))
    }

    /// True for queries against a node that was never added.
    pub fn is_lookup(&self) -> bool {
        matches!(self, GraphError::UnknownNode(_))
    }
}
