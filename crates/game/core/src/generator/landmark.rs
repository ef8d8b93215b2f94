use std::collections::{BTreeSet, VecDeque};

use crate::grid::{Bounds, Direction, Position};
use crate::island::{LandmarkKind, MapLandmark};

pub(super) const LAGOON_ID: &str = "landmark_lagoon";

/// Breadth-first search outward from the bounds centre for the first in-bounds
/// cell that is not `ship`. Consumes no randomness.
pub(super) fn find_hole(bounds: Bounds, ship: Position) -> Option<Position> {
    let start = bounds.center();
    if !bounds.contains(start) {
        return None;
    }

    let mut queue = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);
    while let Some(cell) = queue.pop_front() {
        if cell != ship {
            return Some(cell);
        }
        for next in Direction::ALL.iter().filter_map(|direction| cell.step(*direction)) {
            if bounds.contains(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    None
}

pub(super) fn lagoon(position: Position) -> MapLandmark {
    MapLandmark {
        id: LAGOON_ID.to_string(),
        kind: LandmarkKind::Lagoon,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_is_the_centre_cell() {
        let bounds = Bounds::new(-1, 2, -1, 2);
        assert_eq!(find_hole(bounds, Position::new(0, 2)), Some(Position::new(0, 0)));
    }

    #[test]
    fn hole_skips_the_ship() {
        let bounds = Bounds::new(0, 0, 0, 1);
        // Centre is (0, 0); put the ship there to force a step outward.
        assert_eq!(find_hole(bounds, Position::new(0, 0)), Some(Position::new(0, 1)));
    }

    #[test]
    fn no_hole_when_only_the_ship_fits() {
        let bounds = Bounds::new(0, 0, 0, 0);
        assert_eq!(find_hole(bounds, Position::ORIGIN), None);
        assert_eq!(find_hole(Bounds::new(3, 1, 0, 0), Position::ORIGIN), None);
    }
}
