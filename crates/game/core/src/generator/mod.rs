//! Procedural island generation.
//!
//! [`generate_island`] grows a connected blob of cells outward from the ship,
//! themes it with biomes, decorates it with the ship departure, an optional
//! castaway and weighted gem pickups, then synthesizes movement from the final
//! occupancy. Generation is best effort: bounds too small for the requested
//! node count produce a smaller island, never an error.
//!
//! # Determinism
//!
//! Draws happen in a fixed order: node count, expansion (anchor, spot and, in
//! uniform mode, biome per cell), weighted biome pool and assignment, then gem
//! hosts. The same sequence of draws always yields the same island.

mod expansion;
mod gems;
mod landmark;
mod terrain;

use std::collections::BTreeMap;

use crate::biome::{BiomeRecord, COASTAL_BIOME, DOCK_BIOME, resolve_biome, surface_biomes};
use crate::config::{BiomeMode, GeneratorConfig};
use crate::feature::{Feature, FeatureKind};
use crate::grid::{Bounds, Direction, Occupancy, Position, movement_actions_for_node};
use crate::island::{Action, ActionKind, GEM_ITEM, Island, Node, NodeKind};
use crate::rng::RandomSource;

use expansion::Blob;

/// Id of the ship's departure action.
pub const SHIP_LEAVE_ACTION: &str = "ship_leave";

/// What the castaway says when spoken to.
pub const CASTAWAY_LINE: &str = "Ahoy! The gems on this island hide far from the ship.";

/// The ship always sits on the southern edge, in the origin column.
pub fn ship_start_position(bounds: Bounds) -> Position {
    Position::new(0, bounds.max_y)
}

/// Generates an island from `config`, drawing every decision from `random`.
pub fn generate_island<R>(config: &GeneratorConfig, random: &mut R) -> Island
where
    R: RandomSource + ?Sized,
{
    let bounds = config.resolved_bounds();
    let target = random.range_inclusive(config.min_nodes, config.max_nodes).max(1) as usize;
    let ship = ship_start_position(bounds);
    let hole = if config.place_landmark {
        landmark::find_hole(bounds, ship)
    } else {
        None
    };
    tracing::debug!("generating {} with {target} nodes in {bounds:?}", config.id);

    let surface: Vec<&'static BiomeRecord> = surface_biomes().collect();
    let mut blob = expansion::expand(
        bounds,
        ship,
        hole,
        target,
        config.biome_mode,
        &surface,
        random,
    );
    if config.biome_mode == BiomeMode::Weighted {
        terrain::assign_weighted(&mut blob, &surface, config.smoothing_passes, random);
    }

    let mut nodes = materialize(&blob);
    add_ship_departure(&mut nodes[0]);
    if config.place_npc {
        place_castaway(&mut nodes, &blob.occupancy, bounds);
    }
    let hosts = place_gems(&mut nodes, &blob, random);
    add_movement(&mut nodes, &blob.occupancy);

    let landmarks = hole.map(landmark::lagoon).into_iter().collect();
    tracing::debug!("generated {} nodes, {} gems", nodes.len(), hosts);

    Island::new(config.id.clone(), hosts as u32, nodes, landmarks)
}

/// Turns cells into nodes with titles, colours and structural kinds.
fn materialize(blob: &Blob) -> Vec<Node> {
    let mut counters: BTreeMap<&str, u32> = BTreeMap::new();
    blob.cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let biome = if index == 0 {
                resolve_biome(Some(DOCK_BIOME))
            } else {
                cell.biome
                    .unwrap_or_else(|| resolve_biome(Some(COASTAL_BIOME)))
            };
            let title = if index == 0 {
                "Ship".to_string()
            } else {
                numbered_title(biome, &mut counters)
            };

            let mut node = Node::new(cell.id.clone(), title, biome.id, cell.position);
            node.color = Some(biome.dominant_color.to_string());
            node.kind = if index == 0 {
                NodeKind::Start
            } else if blob.neighbor_indices(index).len() <= 1 {
                NodeKind::Feature
            } else {
                NodeKind::Path
            };
            node
        })
        .collect()
}

/// "Beach", "Beach 2", "Beach 3" in node order.
fn numbered_title<'a>(biome: &'a BiomeRecord, counters: &mut BTreeMap<&'a str, u32>) -> String {
    let count = counters.entry(biome.id).or_insert(0);
    *count += 1;
    if *count == 1 {
        biome.title.to_string()
    } else {
        format!("{} {}", biome.title, count)
    }
}

fn add_ship_departure(ship: &mut Node) {
    ship.actions
        .push(Action::new(SHIP_LEAVE_ACTION, "Sail Away", ActionKind::Ship));
    ship.features.push(
        Feature::new("ship_feature", FeatureKind::Ship)
            .with_action(SHIP_LEAVE_ACTION)
            .with_biome_variant(ship.biome.clone()),
    );
}

/// Puts the castaway on the coastal node nearest the ship that touches water
/// (an out-of-bounds or empty neighbour cell). Ties go to the earlier node.
fn place_castaway(nodes: &mut [Node], occupancy: &Occupancy, bounds: Bounds) {
    let ship = nodes[0].position;
    let touches_water = |position: Position| {
        Direction::ALL.iter().any(|direction| {
            position
                .step(*direction)
                .is_none_or(|next| !bounds.contains(next) || !occupancy.contains_key(&next))
        })
    };
    let Some(host) = nodes
        .iter_mut()
        .skip(1)
        .filter(|node| node.biome == COASTAL_BIOME && touches_water(node.position))
        .min_by_key(|node| node.position.manhattan(ship))
    else {
        tracing::debug!("no coastal node for the castaway");
        return;
    };

    let action_id = format!("{}_talk", host.id);
    host.actions.push(Action::new(
        action_id.clone(),
        "Talk",
        ActionKind::Say {
            line: CASTAWAY_LINE.to_string(),
        },
    ));
    host.features.push(
        Feature::new(format!("{}_person_feature", host.id), FeatureKind::Person)
            .with_action(action_id),
    );
}

/// Places one gem pickup on each chosen host and returns the host count.
fn place_gems<R: RandomSource + ?Sized>(nodes: &mut [Node], blob: &Blob, random: &mut R) -> usize {
    let ship = nodes[0].position;
    let weights: Vec<f64> = (1..nodes.len())
        .map(|index| {
            gems::host_weight(
                nodes[index].position.manhattan(ship),
                blob.neighbor_indices(index).len(),
            )
        })
        .collect();
    let target = gems::gem_target(weights.len());
    let hosts = gems::sample_without_replacement(&weights, target, random);

    for slot in &hosts {
        let node = &mut nodes[slot + 1];
        let action_id = format!("{}_pickup_gem", node.id);
        node.actions.push(Action::new(
            action_id.clone(),
            "Pick Up Gem",
            ActionKind::Pickup {
                item: GEM_ITEM.to_string(),
                amount: Some(1),
            },
        ));
        node.features.push(
            Feature::new(format!("{}_gem_feature", node.id), FeatureKind::Gem)
                .with_action(action_id)
                .with_item(GEM_ITEM, 1),
        );
    }
    tracing::debug!(
        "gem hosts: {:?}",
        hosts.iter().map(|slot| nodes[slot + 1].id.as_str()).collect::<Vec<_>>()
    );
    hosts.len()
}

/// Prepends movement actions to every node.
fn add_movement(nodes: &mut [Node], occupancy: &Occupancy) {
    for node in nodes.iter_mut() {
        let mut actions: Vec<Action> = movement_actions_for_node(node, occupancy)
            .into_iter()
            .collect();
        actions.append(&mut node.actions);
        node.actions = actions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandom;

    #[test]
    fn ship_sits_on_southern_edge() {
        assert_eq!(
            ship_start_position(Bounds::new(-1, 2, -1, 2)),
            Position::new(0, 2)
        );
    }

    #[test]
    fn titles_count_per_biome() {
        let beach = resolve_biome(Some("beach"));
        let cave = resolve_biome(Some("cave"));
        let mut counters = BTreeMap::new();
        assert_eq!(numbered_title(beach, &mut counters), "Beach");
        assert_eq!(numbered_title(cave, &mut counters), "Cave");
        assert_eq!(numbered_title(beach, &mut counters), "Beach 2");
    }

    #[test]
    fn single_cell_bounds_yield_a_lone_ship() {
        let config = GeneratorConfig::new().with_bounds(Bounds::new(0, 0, 0, 0));
        let mut random = SequenceRandom::new(vec![0.5]).unwrap();
        let island = generate_island(&config, &mut random);

        assert_eq!(island.node_count(), 1);
        assert_eq!(island.required_gems(), 0);
        assert!(island.map_landmarks().is_empty());
        let ship = island.ship().unwrap();
        assert_eq!(ship.actions.len(), 1);
        assert_eq!(ship.actions[0].id, SHIP_LEAVE_ACTION);
    }

    #[test]
    fn landmark_cell_stays_empty() {
        let mut random = SequenceRandom::new(vec![0.1, 0.7, 0.3, 0.9]).unwrap();
        let island = generate_island(&GeneratorConfig::default(), &mut random);

        let landmark = &island.map_landmarks()[0];
        assert_eq!(landmark.position, Position::ORIGIN);
        assert!(
            island
                .nodes()
                .values()
                .all(|node| node.position != landmark.position)
        );
    }

    fn grid_nodes(cells: &[(&str, i32, i32, &str)]) -> (Vec<Node>, Occupancy) {
        let nodes: Vec<Node> = cells
            .iter()
            .map(|(id, x, y, biome)| Node::new(*id, *id, *biome, Position::new(*x, *y)))
            .collect();
        let occupancy = nodes
            .iter()
            .map(|node| (node.position, node.id.clone()))
            .collect();
        (nodes, occupancy)
    }

    #[test]
    fn castaway_lands_on_nearest_shore_touching_water() {
        let bounds = Bounds::new(-1, 1, -1, 1);
        let cells = [
            ("ship", 0, 1, DOCK_BIOME),
            ("centre", 0, 0, COASTAL_BIOME),
            ("far", 1, -1, COASTAL_BIOME),
            ("west", -1, 0, COASTAL_BIOME),
            ("east", 1, 0, COASTAL_BIOME),
            ("north", 0, -1, "meadow"),
            ("north_west", -1, -1, "meadow"),
            ("south_west", -1, 1, "meadow"),
            ("south_east", 1, 1, "meadow"),
        ];

        // Every neighbour of the centre is land, so the nearest beach with
        // open water is west, which ties with east and comes first.
        let (mut nodes, occupancy) = grid_nodes(&cells);
        place_castaway(&mut nodes, &occupancy, bounds);
        let hosts: Vec<&str> = nodes
            .iter()
            .filter(|node| node.features.iter().any(|f| f.kind == FeatureKind::Person))
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(hosts, vec!["west"]);
        assert!(nodes[3].action("west_talk").is_some());
        assert!(nodes[3].feature_for_action("west_talk").is_some());

        // Opening the cell north of the centre puts it on the water.
        let (mut nodes, mut occupancy) = grid_nodes(&cells);
        occupancy.remove(&Position::new(0, -1));
        place_castaway(&mut nodes, &occupancy, bounds);
        assert!(nodes[1].action("centre_talk").is_some());
        assert!(nodes[3].actions.is_empty());
    }

    #[test]
    fn castaway_is_optional() {
        let config = GeneratorConfig::new().with_npc(false);
        let mut random = SequenceRandom::new(vec![0.2, 0.8, 0.4, 0.6]).unwrap();
        let island = generate_island(&config, &mut random);
        assert!(
            island
                .nodes()
                .values()
                .flat_map(|node| node.features.iter())
                .all(|feature| feature.kind != FeatureKind::Person)
        );
    }
}
