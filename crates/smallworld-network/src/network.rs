//! The node arena and its query API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallworld_topology::{Dimension, Position};

use crate::error::{Error, Result};
use crate::{NetworkParams, Node, NodeId};

/// A generated network: every lattice cell, keyed by id.
///
/// Nodes refer to each other by [`NodeId`] only. All edge mutation goes
/// through this type so both endpoints of an edge are updated together.
/// Once built a network is only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    dim: Dimension,
    params: NetworkParams,
    nodes: BTreeMap<NodeId, Node>,
}

impl Network {
    pub(crate) fn new(dim: Dimension, params: NetworkParams) -> Self {
        Self {
            dim,
            params,
            nodes: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, node: Node) {
        let previous = self.nodes.insert(node.id(), node);
        debug_assert!(previous.is_none(), "node id collision");
    }

    /// Lattice dimension.
    #[inline]
    pub fn dimension(&self) -> &Dimension {
        &self.dim
    }

    /// Parameters this network was generated with.
    #[inline]
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Number of nodes, active or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All ids in order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Ids of active nodes in order.
    pub fn active_ids(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.is_active())
            .map(Node::id)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_active()).count()
    }

    /// Position of a node.
    pub fn position(&self, id: NodeId) -> Result<&Position> {
        self.nodes
            .get(&id)
            .map(Node::position)
            .ok_or(Error::UnknownNode(id))
    }

    /// Id of the node at a position, if the position is on the lattice.
    pub fn id_at(&self, position: &Position) -> Option<NodeId> {
        if !self.dim.contains(position) {
            return None;
        }
        let id = NodeId::of(position);
        self.nodes.contains_key(&id).then_some(id)
    }

    /// L1 torus distance between two positions.
    #[inline]
    pub fn distance(&self, a: &Position, b: &Position) -> usize {
        self.dim.torus_distance(a, b)
    }

    /// L1 torus distance between two nodes.
    pub fn node_distance(&self, a: NodeId, b: NodeId) -> Result<usize> {
        Ok(self.distance(self.position(a)?, self.position(b)?))
    }

    pub fn out_degree(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(&id).map(Node::out_degree)
    }

    pub fn in_degree(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(&id).map(Node::in_degree)
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Node::out_degree).sum()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))
    }

    /// Add the edge `from -> to`, and `to -> from` too when `reciprocal`.
    ///
    /// Returns whether the forward edge is new. Self-loops are refused.
    pub(crate) fn link(&mut self, from: NodeId, to: NodeId, reciprocal: bool) -> Result<bool> {
        if from == to {
            return Ok(false);
        }
        if !self.nodes.contains_key(&to) {
            return Err(Error::UnknownNode(to));
        }

        let added = self.node_mut(from)?.add_out(to);
        self.node_mut(to)?.add_in(from);
        if reciprocal {
            self.node_mut(from)?.add_in(to);
            self.node_mut(to)?.add_out(from);
        }
        Ok(added)
    }

    /// Mark a node inactive and sever every edge that touches it.
    pub(crate) fn deactivate(&mut self, id: NodeId) -> Result<()> {
        let peers = self.node_mut(id)?.deactivate();
        for peer in peers {
            if let Some(node) = self.nodes.get_mut(&peer) {
                node.remove_link(id);
            }
        }
        Ok(())
    }
}
