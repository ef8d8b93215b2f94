use std::collections::{BTreeSet, VecDeque};

use island_core::{
    ActionKind, BiomeMode, Bounds, BoundsSpec, GeneratorConfig, Island, PcgRandom, Position,
    SequenceRandom, generate_island, island::SHIP_NODE_ID,
};

const SEEDS: [u64; 7] = [1, 2, 3, 4, 5, 42, 99];

/// Park-Miller minimal standard generator.
fn park_miller(seed: u64) -> impl FnMut() -> f64 {
    let mut value = (seed % 2_147_483_647) as i64;
    if value <= 0 {
        value += 2_147_483_646;
    }
    move || {
        value = (value * 16_807) % 2_147_483_647;
        (value - 1) as f64 / 2_147_483_646.0
    }
}

fn reachable_from_ship(island: &Island) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::from([SHIP_NODE_ID.to_string()]);
    while let Some(node_id) = queue.pop_front() {
        if !visited.insert(node_id.clone()) {
            continue;
        }
        let node = island.node(&node_id).expect("move target exists");
        for target in node.movement_actions().filter_map(|action| action.target()) {
            if !visited.contains(target) {
                queue.push_back(target.to_string());
            }
        }
    }
    visited
}

fn assert_invariants(island: &Island, config: &GeneratorConfig) {
    let bounds = config.resolved_bounds();
    let count = island.node_count() as u32;
    assert!(
        (config.min_nodes..=config.max_nodes).contains(&count),
        "{count} nodes outside the configured range"
    );

    let positions: BTreeSet<Position> = island.nodes().values().map(|node| node.position).collect();
    assert_eq!(positions.len(), island.node_count(), "duplicate positions");
    assert!(island.nodes().values().all(|node| bounds.contains(node.position)));

    let ship = island.ship().expect("ship exists");
    assert_eq!(ship.position, Position::new(0, bounds.max_y));
    assert!(ship.actions.iter().any(|action| action.kind == ActionKind::Ship));

    assert_eq!(reachable_from_ship(island).len(), island.node_count());

    for node in island.nodes().values() {
        for target in node.movement_actions().filter_map(|action| action.target()) {
            let back = island.node(target).expect("move target exists");
            assert!(
                back.movement_actions()
                    .any(|action| action.target() == Some(node.id.as_str())),
                "{} -> {target} has no return edge",
                node.id
            );
        }
        for feature in &node.features {
            if let Some(action_id) = &feature.action_id {
                assert!(node.action(action_id).is_some(), "dangling feature {}", feature.id);
            }
        }
    }

    let action_ids: Vec<&str> = island
        .nodes()
        .values()
        .flat_map(|node| node.actions.iter().map(|action| action.id.as_str()))
        .collect();
    let unique: BTreeSet<&str> = action_ids.iter().copied().collect();
    assert_eq!(unique.len(), action_ids.len(), "duplicate action ids");

    assert_eq!(island.required_gems() as usize, island.gem_pickup_count());
    assert!(island.required_gems() >= 1);
}

#[test]
fn seeded_islands_hold_every_invariant() {
    let config = GeneratorConfig::default();
    for seed in SEEDS {
        let island = generate_island(&config, &mut PcgRandom::from_seed(seed));
        assert_invariants(&island, &config);

        let island = generate_island(&config, &mut park_miller(seed));
        assert_invariants(&island, &config);
    }
}

#[test]
fn uniform_mode_holds_every_invariant() {
    let config = GeneratorConfig::new().with_biome_mode(BiomeMode::Uniform);
    for seed in SEEDS {
        let island = generate_island(&config, &mut PcgRandom::from_seed(seed));
        assert_invariants(&island, &config);
    }
}

#[test]
fn cycled_sequences_hold_every_invariant() {
    let config = GeneratorConfig::default();
    for values in [
        vec![0.1, 0.7, 0.3, 0.9],
        vec![0.5, 0.6, 0.7, 0.1],
        vec![0.2, 0.8, 0.4, 0.6],
        vec![0.33, 0.66, 0.1, 0.9],
    ] {
        let mut random = SequenceRandom::new(values).unwrap();
        let island = generate_island(&config, &mut random);
        assert_invariants(&island, &config);
    }
}

#[test]
fn same_seed_same_island() {
    let config = GeneratorConfig::default();
    for seed in SEEDS {
        let first = generate_island(&config, &mut PcgRandom::from_seed(seed));
        let second = generate_island(&config, &mut PcgRandom::from_seed(seed));
        assert_eq!(first, second);
        assert_eq!(
            hex::encode(first.fingerprint()),
            hex::encode(second.fingerprint())
        );
    }
}

#[test]
fn ship_has_no_southern_neighbour() {
    let config = GeneratorConfig::default();
    for seed in SEEDS {
        let island = generate_island(&config, &mut PcgRandom::from_seed(seed));
        let ship = island.ship().unwrap();
        assert!(island.nodes().values().all(|node| node.position.y <= ship.position.y));
        assert!(
            ship.movement_actions()
                .all(|action| !action.id.contains("_move_south_"))
        );
    }
}

#[test]
fn cramped_bounds_yield_fewer_nodes() {
    let config = GeneratorConfig::new()
        .with_bounds(Bounds::new(0, 1, 0, 1))
        .with_landmark(false);
    let island = generate_island(&config, &mut PcgRandom::from_seed(7));

    assert_eq!(island.node_count(), 4);
    assert_eq!(reachable_from_ship(&island).len(), 4);
    assert_eq!(island.required_gems() as usize, island.gem_pickup_count());
}

#[test]
fn larger_islands_stay_connected() {
    let config = GeneratorConfig::new()
        .with_bounds(Bounds::new(-4, 4, -4, 3))
        .with_node_range(20, 30)
        .with_smoothing_passes(3);
    for seed in SEEDS {
        let island = generate_island(&config, &mut PcgRandom::from_seed(seed));
        assert_invariants(&island, &config);
        assert!(!island.map_landmarks().is_empty());
    }
}

#[test]
fn bounds_at_the_integer_limits_still_generate() {
    let southern = BoundsSpec {
        min_y: Some(i32::MAX - 3),
        max_y: Some(i32::MAX),
        ..BoundsSpec::default()
    };
    let widest = BoundsSpec {
        min_x: Some(i32::MIN),
        max_x: Some(i32::MAX),
        ..BoundsSpec::default()
    };

    for spec in [southern, widest] {
        for landmark in [true, false] {
            let config = GeneratorConfig::new()
                .with_bounds(spec)
                .with_landmark(landmark);
            for seed in SEEDS {
                let island = generate_island(&config, &mut PcgRandom::from_seed(seed));
                assert_invariants(&island, &config);
                let bounds = config.resolved_bounds();
                assert!(
                    island
                        .map_landmarks()
                        .iter()
                        .all(|mark| bounds.contains(mark.position))
                );
                assert_eq!(island.map_landmarks().is_empty(), !landmark);
            }
        }
    }
}
