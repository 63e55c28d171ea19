//! Distance-biased (small-world) attachment.

use std::collections::BTreeMap;

use rand::Rng;
use smallworld_topology::Position;
use tracing::{debug, info};

use crate::error::Result;
use crate::progress::{ProgressMeter, ProgressObserver, Stage};
use crate::select::select_bin;
use crate::{Network, NetworkParams, NodeId};

pub(super) fn augment<R: Rng + ?Sized>(
    network: &mut Network,
    rng: &mut R,
    progress: &mut dyn ProgressObserver,
) -> Result<usize> {
    let params = network.params().clone();
    let active: Vec<(NodeId, Position)> = network
        .nodes()
        .filter(|n| n.is_active())
        .map(|n| (n.id(), n.position().clone()))
        .collect();

    let mut added = 0usize;
    for pass in 0..params.far_connections {
        let mut meter = ProgressMeter::new(progress, Stage::DistanceBiased { pass }, active.len());
        let mut pass_added = 0usize;

        for (id, position) in &active {
            match pick_target(network, &params, *id, position, &active, rng)? {
                Some(target) => {
                    if network.link(*id, target, params.real_connection)? {
                        pass_added += 1;
                    }
                }
                None => debug!("No long-range candidate for node {} at {}", id, position),
            }
            meter.tick();
        }
        meter.finish();

        debug!("Distance-biased pass {} added {} links", pass + 1, pass_added);
        added += pass_added;
    }

    info!(
        "Finished distance-biased attachment: {} long-range links over {} active nodes",
        added,
        active.len()
    );
    Ok(added)
}

/// Active nodes grouped by distance from `origin`.
///
/// Leaves out the local neighborhood and nodes `origin` already links to.
fn distance_bins(
    network: &Network,
    params: &NetworkParams,
    origin: NodeId,
    position: &Position,
    active: &[(NodeId, Position)],
) -> BTreeMap<usize, Vec<NodeId>> {
    let linked = network.node(origin).map(|n| n.out_links());
    let mut bins: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();

    for (id, other) in active {
        if *id == origin || linked.is_some_and(|l| l.contains(id)) {
            continue;
        }
        let d = network.distance(position, other);
        if d > params.neighborhood_radius {
            bins.entry(d).or_default().push(*id);
        }
    }
    bins
}

fn pick_target<R: Rng + ?Sized>(
    network: &Network,
    params: &NetworkParams,
    origin: NodeId,
    position: &Position,
    active: &[(NodeId, Position)],
    rng: &mut R,
) -> Result<Option<NodeId>> {
    let bins: Vec<(usize, Vec<NodeId>)> = distance_bins(network, params, origin, position, active)
        .into_iter()
        .collect();
    if bins.is_empty() {
        return Ok(None);
    }

    let weights: Vec<f64> = bins
        .iter()
        .map(|(d, members)| members.len() as f64 / (*d as f64).powf(params.cluster_exponent))
        .collect();
    let (_, candidates) = &bins[select_bin(&weights, rng)?];
    Ok(Some(candidates[rng.gen_range(0..candidates.len())]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::build_lattice;
    use crate::progress::NoProgress;
    use crate::AttachmentType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lattice(params: &NetworkParams, rng: &mut StdRng) -> Network {
        build_lattice(params, rng, &mut NoProgress).unwrap()
    }

    #[test]
    fn one_far_link_per_node() {
        let params = NetworkParams::new(vec![5, 5])
            .with_density(1.0)
            .with_real_connection(false);
        let mut rng = StdRng::seed_from_u64(1);
        let mut net = lattice(&params, &mut rng);

        let added = AttachmentType::DistanceBiased.augment(&mut net, &mut rng, &mut NoProgress).unwrap();
        assert_eq!(added, 25);

        for node in net.nodes() {
            assert_eq!(node.out_degree(), 5);
            let far = node
                .out_links()
                .iter()
                .filter(|&&p| net.distance(node.position(), net.position(p).unwrap()) > 1)
                .count();
            assert_eq!(far, 1);
        }
    }

    #[test]
    fn real_connection_is_reciprocal() {
        let params = NetworkParams::new(vec![9, 9]).with_density(0.8);
        let mut rng = StdRng::seed_from_u64(2);
        let mut net = lattice(&params, &mut rng);
        AttachmentType::DistanceBiased.augment(&mut net, &mut rng, &mut NoProgress).unwrap();

        for a in net.nodes() {
            for &b in a.out_links() {
                let b = net.node(b).unwrap();
                assert!(b.in_links().contains(&a.id()));
                assert!(b.out_links().contains(&a.id()));
            }
        }
    }

    #[test]
    fn far_links_skip_the_neighborhood() {
        let params = NetworkParams::new(vec![11, 11])
            .with_density(1.0)
            .with_neighborhood_radius(2)
            .with_real_connection(false);
        let mut rng = StdRng::seed_from_u64(3);
        let base = lattice(&params, &mut rng);
        let mut net = base.clone();
        AttachmentType::DistanceBiased.augment(&mut net, &mut rng, &mut NoProgress).unwrap();

        for node in net.nodes() {
            let before = base.node(node.id()).unwrap().out_links();
            let new: Vec<_> = node.out_links().difference(before).collect();
            assert_eq!(new.len(), 1);
            let d = net.distance(node.position(), net.position(*new[0]).unwrap());
            assert!(d > 2, "far link at distance {}", d);
        }
    }

    #[test]
    fn extra_passes_add_distinct_links() {
        let params = NetworkParams::new(vec![7, 7])
            .with_density(1.0)
            .with_real_connection(false)
            .with_far_connections(3);
        let mut rng = StdRng::seed_from_u64(4);
        let mut net = lattice(&params, &mut rng);
        let added = AttachmentType::DistanceBiased.augment(&mut net, &mut rng, &mut NoProgress).unwrap();

        assert_eq!(added, 3 * 49);
        assert!(net.nodes().all(|n| n.out_degree() == 4 + 3));
    }

    #[test]
    fn no_active_nodes_is_a_no_op() {
        let params = NetworkParams::new(vec![5, 5]).with_density(0.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut net = lattice(&params, &mut rng);
        let added = AttachmentType::DistanceBiased.augment(&mut net, &mut rng, &mut NoProgress).unwrap();
        assert_eq!(added, 0);
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn lattice_without_far_cells_skips_nodes() {
        // A ring of three: every other cell is a unit neighbor
        let params = NetworkParams::new(vec![3]).with_density(1.0);
        let mut rng = StdRng::seed_from_u64(6);
        let mut net = lattice(&params, &mut rng);
        assert_eq!(AttachmentType::DistanceBiased.augment(&mut net, &mut rng, &mut NoProgress).unwrap(), 0);
    }

    #[test]
    fn bins_group_by_distance() {
        let params = NetworkParams::new(vec![5, 5]).with_density(1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let net = lattice(&params, &mut rng);
        let active: Vec<_> = net.nodes().map(|n| (n.id(), n.position().clone())).collect();
        let (origin, position) = active[0].clone();

        let bins = distance_bins(&net, &params, origin, &position, &active);
        // On a 5 x 5 torus: 8 cells at distance 2, 8 at 3, 4 at 4
        assert_eq!(bins.keys().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(bins[&2].len(), 8);
        assert_eq!(bins[&3].len(), 8);
        assert_eq!(bins[&4].len(), 4);
    }

    #[test]
    fn nearer_bins_win_more_often() {
        // Per-cell weight falls off as 1/d, so distance 2 should beat distance 4
        let params = NetworkParams::new(vec![9, 9]).with_density(1.0).with_real_connection(false);
        let mut rng = StdRng::seed_from_u64(8);
        let base = lattice(&params, &mut rng);
        let active: Vec<_> = base.nodes().map(|n| (n.id(), n.position().clone())).collect();
        let (origin, position) = active[0].clone();

        let mut near = 0usize;
        let mut far = 0usize;
        for _ in 0..4_000 {
            let target = pick_target(&base, &params, origin, &position, &active, &mut rng)
                .unwrap()
                .unwrap();
            match base.distance(&position, base.position(target).unwrap()) {
                2 => near += 1,
                8 => far += 1,
                _ => {}
            }
        }
        // 8 cells at distance 2 (weight 4), 4 cells at distance 8 (weight 0.5)
        assert!(near > 4 * far, "near {} far {}", near, far);
    }

    #[test]
    fn flat_exponent_follows_bin_population() {
        // 5 x 5 bins hold 8, 8 and 4 cells; with d^0 every cell is equally likely
        let params = NetworkParams::new(vec![5, 5])
            .with_density(1.0)
            .with_real_connection(false)
            .with_cluster_exponent(0.0);
        let mut rng = StdRng::seed_from_u64(9);
        let base = lattice(&params, &mut rng);
        let active: Vec<_> = base.nodes().map(|n| (n.id(), n.position().clone())).collect();
        let (origin, position) = active[0].clone();

        let draws = 10_000;
        let mut counts = BTreeMap::new();
        for _ in 0..draws {
            let target = pick_target(&base, &params, origin, &position, &active, &mut rng)
                .unwrap()
                .unwrap();
            *counts.entry(base.distance(&position, base.position(target).unwrap())).or_insert(0usize) += 1;
        }

        for (d, expected) in [(2, 0.4), (3, 0.4), (4, 0.2)] {
            let freq = counts[&d] as f64 / draws as f64;
            assert!((freq - expected).abs() < 0.03, "distance {} frequency {}", d, freq);
        }
    }

    #[test]
    fn steeper_exponent_pulls_links_closer() {
        let mean_distance = |exponent: f64| {
            let params = NetworkParams::new(vec![15, 15])
                .with_density(1.0)
                .with_real_connection(false)
                .with_cluster_exponent(exponent);
            let mut rng = StdRng::seed_from_u64(10);
            let base = lattice(&params, &mut rng);
            let mut net = base.clone();
            AttachmentType::DistanceBiased.augment(&mut net, &mut rng, &mut NoProgress).unwrap();

            let total: usize = net
                .nodes()
                .map(|node| {
                    let before = base.node(node.id()).unwrap().out_links();
                    let far = node.out_links().difference(before).next().unwrap();
                    net.node_distance(node.id(), *far).unwrap()
                })
                .sum();
            total as f64 / net.len() as f64
        };

        let flat = mean_distance(0.0);
        let steep = mean_distance(2.0);
        assert!(steep + 1.0 < flat, "flat {} steep {}", flat, steep);
    }
}
