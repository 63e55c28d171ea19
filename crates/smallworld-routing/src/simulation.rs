//! Batch routing between random node pairs.

use rand::seq::index;
use rand::Rng;
use serde::Serialize;
use smallworld_network::Network;
use tracing::{debug, info};

use crate::error::{Result, RoutingError};
use crate::route::{greedy_route, Route};

/// Messages sent per run by default.
pub const DEFAULT_MESSAGES: usize = 500;

/// Forwarding steps allowed per message by default.
pub const DEFAULT_MAX_HOPS: usize = 500;

/// Repeated greedy routing between distinct random active nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingSimulation {
    pub messages: usize,
    pub max_hops: usize,
}

impl Default for RoutingSimulation {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl RoutingSimulation {
    pub fn new(messages: usize, max_hops: usize) -> Self {
        Self { messages, max_hops }
    }

    /// Route `messages` messages, each between two distinct active nodes.
    pub fn run<R: Rng + ?Sized>(&self, network: &Network, rng: &mut R) -> Result<RoutingReport> {
        let active = network.active_ids();
        if active.len() < 2 {
            return Err(RoutingError::NotEnoughNodes {
                active: active.len(),
            });
        }

        let mut routes = Vec::with_capacity(self.messages);
        for _ in 0..self.messages {
            let pair = index::sample(rng, active.len(), 2);
            let (source, destination) = (active[pair.index(0)], active[pair.index(1)]);
            let route = greedy_route(network, source, destination, self.max_hops)?;
            if !route.delivered {
                debug!(
                    "Message {} -> {} undelivered after {} hops",
                    source, destination, route.hops
                );
            }
            routes.push(route);
        }

        let report = RoutingReport::from_routes(routes);
        info!(
            "Routed {} messages: {} delivered, mean {:?} hops, median {:?} hops",
            report.messages, report.delivered, report.mean_hops, report.median_hops
        );
        Ok(report)
    }
}

/// Summary of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingReport {
    pub messages: usize,
    pub delivered: usize,
    pub failed: usize,
    /// Mean hop count of delivered messages
    pub mean_hops: Option<f64>,
    /// Median hop count of delivered messages
    pub median_hops: Option<f64>,
    /// Delivered fraction; 1.0 when no messages were sent
    pub success_rate: f64,
    #[serde(skip_serializing)]
    pub routes: Vec<Route>,
}

impl RoutingReport {
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let lengths: Vec<usize> = routes.iter().filter(|r| r.delivered).map(|r| r.hops).collect();
        let messages = routes.len();
        let delivered = lengths.len();

        let mean_hops = if lengths.is_empty() {
            None
        } else {
            Some(lengths.iter().sum::<usize>() as f64 / delivered as f64)
        };
        let success_rate = if messages == 0 {
            1.0
        } else {
            delivered as f64 / messages as f64
        };

        Self {
            messages,
            delivered,
            failed: messages - delivered,
            mean_hops,
            median_hops: median(&lengths),
            success_rate,
            routes,
        }
    }
}

/// Median of a set of hop counts; the mean of the middle two for even sizes.
pub fn median(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    }
}
