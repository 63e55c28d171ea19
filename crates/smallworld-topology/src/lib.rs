//! Smallworld Lattice Topology
//!
//! Geometry of an N-dimensional toroidal lattice.
//!
//! # Model
//!
//! A lattice is a list of axis sizes ([`Dimension`]). A cell is a
//! [`Position`] with one coordinate per axis. Every axis wraps around, so
//! index `size - 1` is adjacent to index `0`.
//!
//! Distance is the L1 torus distance: per axis, the shorter of the direct
//! and the wraparound offset, summed over axes. The largest possible
//! distance is the lattice diameter, `sum(size / 2)`.
//!
//! # Neighbor Shells
//!
//! [`neighbors_at_distance`] enumerates the cells at an exact distance
//! from a center. [`Enumeration`] selects between the full enumeration
//! and the legacy two-axis one.

mod dimension;
mod error;
mod neighbors;
mod position;

pub use dimension::{Dimension, Positions};
pub use error::{Result, TopologyError};
pub use neighbors::{neighborhood, neighbors_at_distance, shell_offsets, Enumeration};
pub use position::Position;

/// Radius of the local neighborhood in the classic lattice model.
pub const DEFAULT_NEIGHBORHOOD_RADIUS: usize = 1;
