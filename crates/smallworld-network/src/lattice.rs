//! Base lattice construction.
//!
//! 1. Every cell of the lattice gets a node.
//! 2. Each node is linked both ways to every cell of its local
//!    neighborhood (torus distance `1..=neighborhood_radius`).
//! 3. Each node independently survives with probability `density`; the
//!    rest are deactivated and lose all their edges.

use rand::Rng;
use smallworld_topology::neighborhood;
use tracing::{debug, info};

use crate::error::Result;
use crate::progress::{ProgressMeter, ProgressObserver, Stage};
use crate::{Network, NetworkParams, Node, NodeId};

/// Build the pruned base lattice described by `params`.
pub fn build_lattice<R: Rng + ?Sized>(
    params: &NetworkParams,
    rng: &mut R,
    progress: &mut dyn ProgressObserver,
) -> Result<Network> {
    let dim = params.validate()?;
    let mut network = Network::new(dim.clone(), params.clone());

    for position in dim.positions() {
        network.insert(Node::new(position));
    }

    let ids: Vec<NodeId> = network.ids().collect();
    let mut meter = ProgressMeter::new(progress, Stage::Lattice, ids.len());
    for &id in &ids {
        let position = network.position(id)?.clone();
        for neighbor in neighborhood(&dim, &position, params.neighborhood_radius, params.enumeration) {
            // The neighbor links back when its own turn comes
            network.link(id, NodeId::of(&neighbor), false)?;
        }
        meter.tick();
    }
    meter.finish();

    let mut removed = 0usize;
    for &id in &ids {
        let draw: f64 = rng.gen();
        if draw >= params.density {
            network.deactivate(id)?;
            removed += 1;
        }
    }

    info!("Base lattice built ({} = {} nodes)", dim, network.len());
    debug!(
        "{} of {} nodes active after pruning at density {}",
        network.len() - removed,
        network.len(),
        params.density
    );

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(params: &NetworkParams, seed: u64) -> Network {
        build_lattice(params, &mut StdRng::seed_from_u64(seed), &mut NoProgress).unwrap()
    }

    #[test]
    fn full_density_links_unit_neighbors_mutually() {
        let net = build(&NetworkParams::new(vec![5, 5]).with_density(1.0), 1);
        assert_eq!(net.len(), 25);
        assert_eq!(net.active_count(), 25);

        for node in net.nodes() {
            assert_eq!(node.out_degree(), 4);
            assert_eq!(node.in_degree(), 4);
            for &peer in node.out_links() {
                let other = net.node(peer).unwrap();
                assert!(other.out_links().contains(&node.id()));
                assert!(other.in_links().contains(&node.id()));
                assert_eq!(net.distance(node.position(), other.position()), 1);
            }
        }
    }

    #[test]
    fn every_unit_pair_is_linked() {
        let net = build(&NetworkParams::new(vec![4, 3]).with_density(1.0), 2);
        for a in net.nodes() {
            for b in net.nodes() {
                let d = net.distance(a.position(), b.position());
                assert_eq!(a.out_links().contains(&b.id()), d == 1, "{} -> {}", a.position(), b.position());
            }
        }
    }

    #[test]
    fn zero_density_deactivates_everything() {
        let net = build(&NetworkParams::new(vec![5, 5]).with_density(0.0), 3);
        assert_eq!(net.len(), 25);
        assert_eq!(net.active_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.nodes().all(|n| n.in_links().is_empty()));
    }

    #[test]
    fn inactive_nodes_hold_no_edges() {
        let net = build(&NetworkParams::new(vec![20, 20]).with_density(0.5), 4);
        for node in net.nodes() {
            if !node.is_active() {
                assert_eq!(node.out_degree() + node.in_degree(), 0);
            }
            for peer in node.out_links().iter().chain(node.in_links()) {
                assert!(net.node(*peer).unwrap().is_active());
            }
        }
    }

    #[test]
    fn density_controls_active_fraction() {
        let net = build(&NetworkParams::new(vec![60, 60]).with_density(0.6), 5);
        let fraction = net.active_count() as f64 / net.len() as f64;
        assert!((fraction - 0.6).abs() < 0.05, "active fraction {}", fraction);
    }

    #[test]
    fn wider_neighborhood_links_whole_diamond() {
        let params = NetworkParams::new(vec![9, 9]).with_density(1.0).with_neighborhood_radius(2);
        let net = build(&params, 6);
        for node in net.nodes() {
            assert_eq!(node.out_degree(), 4 + 8);
        }
    }

    #[test]
    fn invalid_params_fail_fast() {
        let params = NetworkParams::new(vec![5, 5]).with_density(2.0);
        assert!(build_lattice(&params, &mut StdRng::seed_from_u64(0), &mut NoProgress).is_err());
    }
}
