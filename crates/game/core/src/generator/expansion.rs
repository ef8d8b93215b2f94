//! Random frontier growth from the ship.

use crate::biome::{BiomeRecord, COASTAL_BIOME, resolve_biome};
use crate::config::BiomeMode;
use crate::grid::{Bounds, Direction, Occupancy, Position};
use crate::island::SHIP_NODE_ID;
use crate::rng::RandomSource;

/// A placed cell before it becomes a [`crate::island::Node`].
#[derive(Clone, Debug)]
pub(super) struct Cell {
    pub id: String,
    pub position: Position,
    /// Chosen at placement in uniform mode, afterwards in weighted mode.
    pub biome: Option<&'static BiomeRecord>,
}

/// Connected set of cells grown outward from the ship. Index 0 is the ship.
#[derive(Clone, Debug)]
pub(super) struct Blob {
    pub cells: Vec<Cell>,
    pub occupancy: Occupancy,
}

impl Blob {
    fn seed(ship: Position) -> Self {
        let mut occupancy = Occupancy::new();
        occupancy.insert(ship, SHIP_NODE_ID.to_string());
        Self {
            cells: vec![Cell {
                id: SHIP_NODE_ID.to_string(),
                position: ship,
                biome: None,
            }],
            occupancy,
        }
    }

    /// In-bounds, unoccupied, unreserved neighbours of `position`, in
    /// direction order.
    fn open_neighbors(
        &self,
        position: Position,
        bounds: Bounds,
        hole: Option<Position>,
    ) -> Vec<Position> {
        Direction::ALL
            .iter()
            .filter_map(|direction| position.step(*direction))
            .filter(|next| {
                bounds.contains(*next)
                    && Some(*next) != hole
                    && !self.occupancy.contains_key(next)
            })
            .collect()
    }

    /// Indices of graph neighbours of cell `index`, in direction order.
    pub fn neighbor_indices(&self, index: usize) -> Vec<usize> {
        let position = self.cells[index].position;
        Direction::ALL
            .iter()
            .filter_map(|direction| position.step(*direction))
            .filter_map(|next| self.occupancy.get(&next))
            .filter_map(|id| self.cells.iter().position(|cell| &cell.id == id))
            .collect()
    }
}

/// Grows the blob until it holds `target` cells or the frontier is empty.
///
/// Per new cell: one draw for the anchor, one for the spot, and in uniform
/// mode one for the biome.
pub(super) fn expand<R: RandomSource + ?Sized>(
    bounds: Bounds,
    ship: Position,
    hole: Option<Position>,
    target: usize,
    mode: BiomeMode,
    surface: &[&'static BiomeRecord],
    random: &mut R,
) -> Blob {
    let mut blob = Blob::seed(ship);

    while blob.cells.len() < target {
        let frontier: Vec<usize> = (0..blob.cells.len())
            .filter(|index| {
                !blob
                    .open_neighbors(blob.cells[*index].position, bounds, hole)
                    .is_empty()
            })
            .collect();
        let Some(anchor) = random.pick_index(frontier.len()).map(|pick| frontier[pick]) else {
            tracing::warn!(
                "frontier exhausted at {} of {} requested nodes",
                blob.cells.len(),
                target
            );
            break;
        };

        let spots = blob.open_neighbors(blob.cells[anchor].position, bounds, hole);
        let Some(spot) = random.pick_index(spots.len()).map(|pick| spots[pick]) else {
            continue;
        };

        let biome = match mode {
            BiomeMode::Uniform => Some(
                random
                    .pick_index(surface.len())
                    .map_or_else(|| resolve_biome(Some(COASTAL_BIOME)), |pick| surface[pick]),
            ),
            BiomeMode::Weighted => None,
        };

        let id = format!("node_{}", blob.cells.len());
        blob.occupancy.insert(spot, id.clone());
        blob.cells.push(Cell {
            id,
            position: spot,
            biome,
        });
    }

    blob
}
