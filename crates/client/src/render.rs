//! Plain-text island map.

use island_core::{FeatureKind, Island, LandmarkKind, Node, NodeKind, Position, RunState};

/// Draws the island as a character grid, north at the top.
///
/// `@` is the current node, `S` the ship, `P` a castaway still to talk to and
/// `*` a gem still on the ground. Other nodes are `.`, landmarks use their
/// own glyph and water is blank.
pub fn ascii_map(island: &Island, state: Option<&RunState>) -> String {
    let positions = island
        .nodes()
        .values()
        .map(|node| node.position)
        .chain(island.map_landmarks().iter().map(|landmark| landmark.position));

    let Some((min, max)) = extent(positions) else {
        return String::new();
    };

    let mut rows = Vec::new();
    for y in min.y..=max.y {
        let row: Vec<char> = (min.x..=max.x)
            .map(|x| glyph_at(island, state, Position::new(x, y)))
            .collect();
        let line: String = row
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        rows.push(line.trim_end().to_string());
    }
    rows.join("\n")
}

fn extent(positions: impl Iterator<Item = Position>) -> Option<(Position, Position)> {
    positions.fold(None, |acc, position| match acc {
        None => Some((position, position)),
        Some((min, max)) => Some((
            Position::new(min.x.min(position.x), min.y.min(position.y)),
            Position::new(max.x.max(position.x), max.y.max(position.y)),
        )),
    })
}

fn glyph_at(island: &Island, state: Option<&RunState>, position: Position) -> char {
    if let Some(node) = island.nodes().values().find(|node| node.position == position) {
        return node_glyph(node, state);
    }
    island
        .map_landmarks()
        .iter()
        .find(|landmark| landmark.position == position)
        .map(|landmark| match landmark.kind {
            LandmarkKind::Lagoon => '~',
            LandmarkKind::Peak => '^',
            LandmarkKind::Wreck => '%',
        })
        .unwrap_or(' ')
}

fn node_glyph(node: &Node, state: Option<&RunState>) -> char {
    if state.is_some_and(|state| state.current_node_id == node.id) {
        return '@';
    }
    if node.kind == NodeKind::Start {
        return 'S';
    }

    let pending = |kind: FeatureKind| {
        node.features.iter().any(|feature| {
            feature.kind == kind
                && !state.is_some_and(|state| state.completed_features.contains(&feature.id))
        })
    };
    if pending(FeatureKind::Person) {
        'P'
    } else if pending(FeatureKind::Gem) {
        '*'
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use island_core::{
        GeneratorConfig, PcgRandom, apply_action, create_initial_state, create_manual_island,
        generate_island,
    };

    #[test]
    fn draws_manual_island() {
        let island = create_manual_island();
        assert_eq!(ascii_map(&island, None), "* *\nS");

        let state = create_initial_state(&island);
        assert_eq!(ascii_map(&island, Some(&state)), "* *\n@");

        let state = apply_action(&island, &state, "ship_move_north_beach").state;
        let state = apply_action(&island, &state, "beach_pick_gem").state;
        assert_eq!(ascii_map(&island, Some(&state)), "@ *\nS");
    }

    #[test]
    fn generated_island_has_one_glyph_per_node() {
        let island = generate_island(&GeneratorConfig::default(), &mut PcgRandom::from_seed(7));
        let map = ascii_map(&island, None);
        let drawn = map.chars().filter(|c| matches!(c, 'S' | 'P' | '*' | '.')).count();
        assert_eq!(drawn, island.node_count());
        assert_eq!(map.matches('S').count(), 1);
    }
}
