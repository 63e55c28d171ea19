//! Single-message greedy forwarding.

use serde::Serialize;
use smallworld_network::{Network, NodeId};
use smallworld_topology::Position;

use crate::error::{Result, RoutingError};

/// One step of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hop {
    /// Zero for the source
    pub hop: usize,
    pub node: NodeId,
    /// Torus distance from `node` to the destination
    pub distance: usize,
}

/// The path a message took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub source: NodeId,
    pub destination: NodeId,
    /// Number of forwarding steps taken
    pub hops: usize,
    /// Whether the message reached its destination
    pub delivered: bool,
    /// Every node visited, starting with the source
    pub trace: Vec<Hop>,
}

/// Pick the out-link of `current` closest to `target`.
///
/// Ties go to the lowest id. Returns `None` when `current` has no
/// out-links.
pub fn next_hop(network: &Network, current: NodeId, target: &Position) -> Result<Option<(NodeId, usize)>> {
    let node = network.node(current).ok_or(RoutingError::UnknownNode(current))?;

    let mut best: Option<(NodeId, usize)> = None;
    for &neighbor in node.out_links() {
        let dist = network.distance(network.position(neighbor)?, target);
        match best {
            None => best = Some((neighbor, dist)),
            Some((_, best_dist)) if dist < best_dist => best = Some((neighbor, dist)),
            _ => {}
        }
    }
    Ok(best)
}

/// Forward a message from `source` toward `destination`.
///
/// Every step moves to the out-link nearest the destination, even when
/// that is no nearer than the current node. The route ends when the
/// destination is reached, when `max_hops` steps have been taken, or at a
/// node without out-links.
pub fn greedy_route(
    network: &Network,
    source: NodeId,
    destination: NodeId,
    max_hops: usize,
) -> Result<Route> {
    let target = network
        .position(destination)
        .map_err(|_| RoutingError::UnknownNode(destination))?
        .clone();
    let start = network
        .position(source)
        .map_err(|_| RoutingError::UnknownNode(source))?;

    let mut current = source;
    let mut distance = network.distance(start, &target);
    let mut trace = vec![Hop { hop: 0, node: current, distance }];
    let mut hops = 0usize;

    while distance != 0 && hops < max_hops {
        let Some((next, next_distance)) = next_hop(network, current, &target)? else {
            break;
        };
        hops += 1;
        current = next;
        distance = next_distance;
        trace.push(Hop { hop: hops, node: current, distance });
    }

    Ok(Route {
        source,
        destination,
        hops,
        delivered: distance == 0,
        trace,
    })
}
