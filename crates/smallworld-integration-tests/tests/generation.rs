//! End-to-end network generation scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;
use smallworld_network::{
    AttachmentType, Enumeration, Network, NetworkBuilder, NetworkParams, NoProgress, Position,
};

fn build(params: NetworkParams, seed: u64) -> Network {
    NetworkBuilder::new(params)
        .build_uncached(&mut StdRng::seed_from_u64(seed), &mut NoProgress)
        .unwrap()
}

#[test]
fn full_density_small_world_adds_one_far_link() {
    let params = NetworkParams::new(vec![5, 5])
        .with_density(1.0)
        .with_real_connection(false);
    let net = build(params, 1);

    assert_eq!(net.len(), 25);
    assert_eq!(net.active_count(), 25);
    for node in net.nodes() {
        assert_eq!(node.out_degree(), 5);
        let far = node
            .out_links()
            .iter()
            .filter(|&&id| net.node_distance(node.id(), id).unwrap() > 1)
            .count();
        assert_eq!(far, 1);
    }
}

#[test]
fn zero_density_leaves_no_edges() {
    for attachment in [AttachmentType::DistanceBiased, AttachmentType::DegreeBiased] {
        let params = NetworkParams::new(vec![5, 5])
            .with_density(0.0)
            .with_attachment(attachment);
        let net = build(params, 2);

        assert_eq!(net.len(), 25);
        assert_eq!(net.active_count(), 0);
        assert_eq!(net.edge_count(), 0);
    }
}

#[test]
fn real_connections_are_mutual() {
    for attachment in [AttachmentType::DistanceBiased, AttachmentType::DegreeBiased] {
        let params = NetworkParams::new(vec![12, 12])
            .with_density(0.8)
            .with_attachment(attachment)
            .with_out_links(2);
        let net = build(params, 3);

        for node in net.nodes() {
            for &other in node.out_links() {
                let other = net.node(other).unwrap();
                assert!(other.out_links().contains(&node.id()));
                assert!(other.in_links().contains(&node.id()));
                assert!(node.in_links().contains(&other.id()));
            }
        }
    }
}

#[test]
fn inactive_nodes_stay_unlinked() {
    let params = NetworkParams::new(vec![15, 15]).with_density(0.5);
    let net = build(params, 4);

    assert!(net.active_count() > 0 && net.active_count() < net.len());
    for node in net.nodes().filter(|n| !n.is_active()) {
        assert_eq!(node.out_degree(), 0);
        assert_eq!(node.in_degree(), 0);
    }
    for node in net.nodes().filter(|n| n.is_active()) {
        for &other in node.out_links() {
            assert!(net.node(other).unwrap().is_active());
        }
    }
}

#[test]
fn same_seed_same_network() {
    let params = NetworkParams::new(vec![10, 10])
        .with_density(0.7)
        .with_attachment(AttachmentType::DegreeBiased)
        .with_out_links(2);
    assert_eq!(build(params.clone(), 5), build(params, 5));
}

#[test]
fn three_axis_modes_differ_only_off_the_plane() {
    let full = NetworkParams::new(vec![8, 8, 8])
        .with_density(1.0)
        .with_neighborhood_radius(3)
        .with_real_connection(false);
    let legacy = full.clone().with_enumeration(Enumeration::TwoAxis);

    let full = build(full, 6);
    let legacy = build(legacy, 6);

    // Shells 1 and 2 agree (6 + 18); shell 3 has 38 offsets, 8 of them on three axes
    let origin = full.id_at(&Position::from([0, 0, 0])).unwrap();
    let local = |net: &Network| {
        net.node(origin)
            .unwrap()
            .out_links()
            .iter()
            .filter(|&&id| net.node_distance(origin, id).unwrap() <= 3)
            .count()
    };
    assert_eq!(local(&full), 62);
    assert_eq!(local(&legacy), 54);
}

#[test]
fn positions_round_trip_through_ids() {
    let net = build(NetworkParams::new(vec![7, 4]).with_density(1.0), 7);
    for node in net.nodes() {
        assert_eq!(net.id_at(node.position()), Some(node.id()));
        assert_eq!(net.dimension().torus_distance(node.position(), node.position()), 0);
    }
}
