//! Grid coordinates, cardinal directions and movement-edge synthesis.
//!
//! Islands live on an unbounded integer grid where north is `y - 1` and south
//! is `y + 1`. Generation confines nodes to a [`Bounds`] rectangle; the ship
//! always sits on the southern edge.

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::island::{Action, ActionKind, Node};

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`, or `None` when
    /// that cell is outside the `i32` grid.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Manhattan (taxicab) distance between two cells, saturating at `u32::MAX`.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }

    /// Canonical hashable key, `"x,y"`.
    pub fn key(self) -> String {
        coordinate_key(self.x, self.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Canonicalizes a coordinate pair into a string key.
pub fn coordinate_key(x: i32, y: i32) -> String {
    format!("{x},{y}")
}

/// Inclusive rectangle that generated nodes must stay inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub const fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Cell nearest to the geometric centre of the rectangle.
    pub fn center(&self) -> Position {
        // The midpoint of two i32 values always fits back into i32.
        let midpoint = |min: i32, max: i32| (i64::from(min) + i64::from(max)).div_euclid(2) as i32;
        Position::new(
            midpoint(self.min_x, self.max_x),
            midpoint(self.min_y, self.max_y),
        )
    }
}

/// Partially specified bounds; missing sides fall back to a default rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoundsSpec {
    pub min_x: Option<i32>,
    pub max_x: Option<i32>,
    pub min_y: Option<i32>,
    pub max_y: Option<i32>,
}

impl BoundsSpec {
    /// Fills every missing side from `fallback`. No further validation.
    pub fn resolve(&self, fallback: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.unwrap_or(fallback.min_x),
            max_x: self.max_x.unwrap_or(fallback.max_x),
            min_y: self.min_y.unwrap_or(fallback.min_y),
            max_y: self.max_y.unwrap_or(fallback.max_y),
        }
    }
}

impl From<Bounds> for BoundsSpec {
    fn from(bounds: Bounds) -> Self {
        Self {
            min_x: Some(bounds.min_x),
            max_x: Some(bounds.max_x),
            min_y: Some(bounds.min_y),
            max_y: Some(bounds.max_y),
        }
    }
}

/// The four movement directions between grid cells.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions in canonical iteration order.
    ///
    /// Movement actions and neighbour scans follow this order, so it is part
    /// of the generator's determinism contract.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Returns the offset (dx, dy) for this direction. North is `-y`.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    /// Player-facing label for the move action.
    pub const fn label(self) -> &'static str {
        match self {
            Direction::North => "Go North",
            Direction::South => "Go South",
            Direction::West => "Go West",
            Direction::East => "Go East",
        }
    }
}

/// Lookup from occupied cell to the id of the node occupying it.
pub type Occupancy = BTreeMap<Position, String>;

/// Builds the movement action id for an edge.
pub fn movement_action_id(origin: &str, direction: Direction, destination: &str) -> String {
    format!("{origin}_move_{direction}_{destination}")
}

/// Synthesizes one `move` action per direction with an occupied neighbour.
///
/// Pure function of the node position and the occupancy lookup. Because the
/// lookup is symmetric, running this for every node yields reciprocal edges.
pub fn movement_actions_for_node(node: &Node, occupancy: &Occupancy) -> ArrayVec<Action, 4> {
    let mut actions = ArrayVec::new();
    for direction in Direction::ALL {
        let Some(neighbor) = node
            .position
            .step(direction)
            .and_then(|next| occupancy.get(&next))
        else {
            continue;
        };
        actions.push(Action::new(
            movement_action_id(&node.id, direction, neighbor),
            direction.label(),
            ActionKind::Move {
                to: neighbor.clone(),
            },
        ));
    }
    actions
}

/// Ids of the nodes orthogonally adjacent to `position`, in direction order.
pub fn neighbor_ids<'a>(position: Position, occupancy: &'a Occupancy) -> Vec<&'a str> {
    Direction::ALL
        .iter()
        .filter_map(|direction| position.step(*direction))
        .filter_map(|next| occupancy.get(&next))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_at(id: &str, x: i32, y: i32) -> Node {
        Node::new(id, id, "beach", Position::new(x, y))
    }

    #[test]
    fn coordinate_keys_are_canonical() {
        assert_eq!(coordinate_key(-1, 2), "-1,2");
        assert_eq!(Position::new(3, -4).key(), "3,-4");
    }

    #[test]
    fn north_decreases_y() {
        let origin = Position::ORIGIN;
        assert_eq!(origin.step(Direction::North), Some(Position::new(0, -1)));
        assert_eq!(origin.step(Direction::South), Some(Position::new(0, 1)));
        assert_eq!(origin.step(Direction::West), Some(Position::new(-1, 0)));
        assert_eq!(origin.step(Direction::East), Some(Position::new(1, 0)));
    }

    #[test]
    fn grid_edges_do_not_overflow() {
        let corner = Position::new(i32::MAX, i32::MIN);
        assert_eq!(corner.step(Direction::East), None);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(
            corner.step(Direction::West),
            Some(Position::new(i32::MAX - 1, i32::MIN))
        );

        let opposite = Position::new(i32::MIN, i32::MAX);
        assert_eq!(corner.manhattan(opposite), u32::MAX);
        assert_eq!(opposite.manhattan(Position::ORIGIN), u32::MAX);

        let widest = Bounds::new(i32::MIN, i32::MAX, i32::MAX - 3, i32::MAX);
        assert_eq!(widest.center(), Position::new(-1, i32::MAX - 2));
        assert!(widest.contains(widest.center()));
    }

    #[test]
    fn bounds_resolve_missing_sides_from_fallback() {
        let fallback = Bounds::new(-1, 2, -1, 2);
        let partial = BoundsSpec {
            max_x: Some(5),
            ..BoundsSpec::default()
        };
        assert_eq!(partial.resolve(fallback), Bounds::new(-1, 5, -1, 2));
        assert!(fallback.contains(Position::new(2, -1)));
        assert!(!fallback.contains(Position::new(3, 0)));
    }

    #[test]
    fn movement_actions_follow_occupied_neighbors() {
        let center = node_at("center", 0, 0);
        let mut occupancy = Occupancy::new();
        occupancy.insert(Position::new(0, 0), "center".into());
        occupancy.insert(Position::new(0, -1), "north".into());
        occupancy.insert(Position::new(1, 0), "east".into());

        let actions = movement_actions_for_node(&center, &occupancy);
        let ids: Vec<&str> = actions.iter().map(|action| action.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["center_move_north_north", "center_move_east_east"]
        );
        assert_eq!(actions[0].label, "Go North");
        assert_eq!(actions[0].target(), Some("north"));
    }

    #[test]
    fn isolated_node_has_no_movement() {
        let lonely = node_at("lonely", 4, 4);
        let mut occupancy = Occupancy::new();
        occupancy.insert(Position::new(4, 4), "lonely".into());
        assert!(movement_actions_for_node(&lonely, &occupancy).is_empty());
        assert!(neighbor_ids(lonely.position, &occupancy).is_empty());
    }
}
