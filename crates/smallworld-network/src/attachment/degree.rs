//! Degree-biased (preferential, Yule) attachment.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::progress::{ProgressMeter, ProgressObserver, Stage};
use crate::select::select_bin;
use crate::{Network, NodeId};

pub(super) fn augment<R: Rng + ?Sized>(
    network: &mut Network,
    rng: &mut R,
    progress: &mut dyn ProgressObserver,
) -> Result<usize> {
    let params = network.params().clone();
    let active = network.active_ids();
    let mut buckets = DegreeBuckets::from_network(network, &active);

    let mut added = 0usize;
    for pass in 0..params.num_out_links {
        let mut meter = ProgressMeter::new(progress, Stage::DegreeBiased { pass }, active.len());

        // Each active node is visited once per pass
        for &id in &active {
            let excluded = network
                .node(id)
                .map(|n| n.out_links().clone())
                .ok_or(Error::UnknownNode(id))?;

            let target = buckets.pick(id, &excluded, params.preference_exponent, rng)?;
            network.link(id, target, params.real_connection)?;
            added += 1;

            buckets.set_degree(target, network.in_degree(target).unwrap_or(0));
            if params.real_connection {
                buckets.set_degree(id, network.in_degree(id).unwrap_or(0));
            }
            meter.tick();
        }
        meter.finish();
        debug!("Degree-biased pass {} done, {} links so far", pass + 1, added);
    }

    info!(
        "Finished degree-biased attachment: {} long-range links over {} active nodes",
        added,
        active.len()
    );
    Ok(added)
}

/// A set with O(1) insert, remove and uniform sampling.
#[derive(Debug, Default)]
struct Bucket {
    members: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
}

impl Bucket {
    fn insert(&mut self, id: NodeId) {
        if self.index.contains_key(&id) {
            return;
        }
        self.index.insert(id, self.members.len());
        self.members.push(id);
    }

    fn remove(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.index.remove(&id) else {
            return false;
        };
        self.members.swap_remove(slot);
        if let Some(&moved) = self.members.get(slot) {
            self.index.insert(moved, slot);
        }
        true
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NodeId {
        self.members[rng.gen_range(0..self.members.len())]
    }
}

/// Active nodes partitioned by current in-degree.
#[derive(Debug, Default)]
struct DegreeBuckets {
    buckets: BTreeMap<usize, Bucket>,
    degree_of: HashMap<NodeId, usize>,
}

impl DegreeBuckets {
    fn from_network(network: &Network, active: &[NodeId]) -> Self {
        let mut buckets = Self::default();
        for &id in active {
            buckets.set_degree(id, network.in_degree(id).unwrap_or(0));
        }
        buckets
    }

    /// Move `id` into the bucket for `degree`.
    fn set_degree(&mut self, id: NodeId, degree: usize) {
        if let Some(old) = self.degree_of.insert(id, degree) {
            if old == degree {
                return;
            }
            if let Some(bucket) = self.buckets.get_mut(&old) {
                bucket.remove(id);
                if bucket.is_empty() {
                    self.buckets.remove(&old);
                }
            }
        }
        self.buckets.entry(degree).or_default().insert(id);
    }

    #[cfg(test)]
    fn degree(&self, id: NodeId) -> Option<usize> {
        self.degree_of.get(&id).copied()
    }

    /// Draw a target for `origin`, never `origin` itself nor a node in `excluded`.
    ///
    /// Bucket `k > 0` is weighted by its eligible population times
    /// `k^exponent`, then a member is drawn uniformly from it. That is the
    /// same distribution as redrawing whenever an excluded node comes up,
    /// without the unbounded retry.
    fn pick<R: Rng + ?Sized>(
        &self,
        origin: NodeId,
        excluded: &BTreeSet<NodeId>,
        exponent: f64,
        rng: &mut R,
    ) -> Result<NodeId> {
        let mut blocked: HashMap<usize, usize> = HashMap::new();
        for id in excluded.iter().chain(std::iter::once(&origin)) {
            if let Some(&k) = self.degree_of.get(id) {
                *blocked.entry(k).or_default() += 1;
            }
        }

        let degrees: Vec<(usize, &Bucket)> = self.buckets.iter().map(|(k, b)| (*k, b)).collect();
        // Zero in-degree never attracts links, whatever the exponent
        let weight = |k: usize, population: usize| {
            if k == 0 {
                0.0
            } else {
                population as f64 * (k as f64).powf(exponent)
            }
        };

        let raw: Vec<f64> = degrees.iter().map(|(k, b)| weight(*k, b.len())).collect();
        if !raw.iter().any(|w| *w > 0.0) {
            return Err(Error::EmptyWeightDistribution);
        }

        let eligible: Vec<f64> = degrees
            .iter()
            .map(|(k, b)| {
                let open = b.len().saturating_sub(blocked.get(k).copied().unwrap_or(0));
                weight(*k, open)
            })
            .collect();
        if !eligible.iter().any(|w| *w > 0.0) {
            return Err(Error::NoEligibleCandidate { node: origin });
        }

        let (_, bucket) = degrees[select_bin(&eligible, rng)?];
        loop {
            let candidate = bucket.sample(rng);
            if candidate != origin && !excluded.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }
}
