//! Error types for routing.

use smallworld_network::NodeId;
use thiserror::Error;

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while routing.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Endpoint not present in the network
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// A simulation needs at least two active nodes
    #[error("Not enough active nodes to route between: {active}")]
    NotEnoughNodes { active: usize },

    /// Network query failed
    #[error(transparent)]
    Network(#[from] smallworld_network::Error),
}
