//! Error types for network generation.

use std::path::PathBuf;

use smallworld_topology::TopologyError;
use thiserror::Error;

use crate::NodeId;

/// Result type for network operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a network.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed size list
    #[error(transparent)]
    InvalidDimension(#[from] TopologyError),

    /// Generation parameter out of range
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Degree-biased attachment found no admissible target for a node
    #[error("No eligible candidate for node {node}")]
    NoEligibleCandidate { node: NodeId },

    /// Bin selection asked to draw from weights that sum to zero
    #[error("Weight distribution is empty")]
    EmptyWeightDistribution,

    /// Id not present in the network
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Could not load a cached network
    #[error("Cache read failed for {path}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: CacheError,
    },

    /// Could not store a built network
    #[error("Cache write failed for {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: CacheError,
    },
}

impl Error {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

/// Underlying cause of a cache failure.
#[derive(Debug, Error)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding error
    #[error("Codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Blob decoded but does not belong to the requested build
    #[error("Stale cache entry: {reason}")]
    Stale { reason: String },
}
