//! Lattice nodes and their identifiers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallworld_topology::{neighbors_at_distance, Dimension, Enumeration, Position};

/// Stable node identifier derived from a position.
///
/// The first eight bytes of the BLAKE3 hash of the position's coordinates,
/// so the same cell gets the same id in every build and every process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Derive the id of the cell at `position`.
    pub fn of(position: &Position) -> Self {
        let hash = blake3::hash(&position.to_le_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        Self(u64::from_be_bytes(prefix))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// One lattice cell and its adjacency.
///
/// Edges are stored as ids; they are only ever changed through the owning
/// [`crate::Network`], which keeps both endpoints in agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    position: Position,
    active: bool,
    out_links: BTreeSet<NodeId>,
    in_links: BTreeSet<NodeId>,
}

impl Node {
    /// Create an active node with no edges.
    pub fn new(position: Position) -> Self {
        Self {
            id: NodeId::of(&position),
            position,
            active: true,
            out_links: BTreeSet::new(),
            in_links: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Inactive nodes hold no edges and take no part in attachment.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Nodes this node forwards to.
    #[inline]
    pub fn out_links(&self) -> &BTreeSet<NodeId> {
        &self.out_links
    }

    /// Nodes that forward to this node.
    #[inline]
    pub fn in_links(&self) -> &BTreeSet<NodeId> {
        &self.in_links
    }

    #[inline]
    pub fn out_degree(&self) -> usize {
        self.out_links.len()
    }

    #[inline]
    pub fn in_degree(&self) -> usize {
        self.in_links.len()
    }

    /// Cells at exact torus distance `n` from this node.
    pub fn neighbors_at_distance(
        &self,
        dim: &Dimension,
        n: usize,
        mode: Enumeration,
    ) -> BTreeSet<Position> {
        neighbors_at_distance(dim, &self.position, n, mode)
    }

    pub(crate) fn add_out(&mut self, to: NodeId) -> bool {
        self.out_links.insert(to)
    }

    pub(crate) fn add_in(&mut self, from: NodeId) -> bool {
        self.in_links.insert(from)
    }

    pub(crate) fn remove_link(&mut self, other: NodeId) {
        self.out_links.remove(&other);
        self.in_links.remove(&other);
    }

    /// Mark inactive and drop every edge, returning every former peer.
    pub(crate) fn deactivate(&mut self) -> BTreeSet<NodeId> {
        self.active = false;
        let mut former = std::mem::take(&mut self.out_links);
        former.append(&mut self.in_links);
        former
    }
}
