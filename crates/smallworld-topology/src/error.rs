//! Error types for lattice geometry.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while describing a lattice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// Malformed size list (empty, zero-sized axis, overflowing cell count)
    #[error("Invalid dimension: {reason}")]
    InvalidDimension { reason: String },
}

impl TopologyError {
    pub(crate) fn dimension(reason: impl Into<String>) -> Self {
        Self::InvalidDimension { reason: reason.into() }
    }
}
