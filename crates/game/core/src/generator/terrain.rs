//! Weighted biome assignment with neighbour smoothing.
//!
//! Each surface cell gets a placement score per pooled biome from its
//! normalized distance to the surface centroid and whether it sits on the
//! occupied rectangle's perimeter. An initial roulette pick per cell is then
//! re-rolled for a number of passes. During a pass every graph neighbour that
//! holds a candidate biome, and the cell's own previous pick, multiplies that
//! candidate's score by [`NEIGHBOR_GAIN`], so local agreement outweighs the
//! placement curves and clusters grow.

use crate::biome::{BiomePlacement, BiomeRecord, COASTAL_BIOME, resolve_biome};
use crate::rng::RandomSource;

use super::expansion::Blob;

/// Floor added to every placement score so no pooled biome is impossible.
const BASE_WEIGHT: f64 = 0.4;

/// Score multiplier per holder of a candidate biome during smoothing.
const NEIGHBOR_GAIN: f64 = 4.0;

/// Where a cell sits relative to the surface shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Site {
    /// Manhattan distance to the centroid over the largest such distance.
    pub norm: f64,
    /// On the perimeter of the occupied bounding rectangle.
    pub edge: bool,
}

/// Size-dependent strength of the placement curves. Small islands stay close
/// to uniform.
pub(super) fn bias_strength(surface_count: usize) -> f64 {
    (surface_count as f64 / 12.0).clamp(0.35, 1.0)
}

pub(super) fn placement_weight(placement: BiomePlacement, site: Site, bias: f64) -> f64 {
    let shape = match placement {
        BiomePlacement::Coastal => 1.6 * site.norm + if site.edge { 1.2 } else { 0.0 },
        BiomePlacement::Elevated => 1.6 * (1.0 - site.norm),
        BiomePlacement::Midland => 1.4 * (-(site.norm - 0.5).powi(2) / 0.08).exp(),
        BiomePlacement::Outer => 1.2 * site.norm,
        BiomePlacement::Uniform => 0.6,
    };
    BASE_WEIGHT + bias * shape
}

/// Draws the biome pool: the coastal biome plus `max(2, round(n / 3)) - 1`
/// others without replacement, one draw each.
pub(super) fn build_pool<R: RandomSource + ?Sized>(
    surface: &[&'static BiomeRecord],
    surface_count: usize,
    random: &mut R,
) -> Vec<&'static BiomeRecord> {
    let coastal = surface
        .iter()
        .copied()
        .find(|biome| biome.id == COASTAL_BIOME)
        .unwrap_or_else(|| resolve_biome(Some(COASTAL_BIOME)));
    let size = ((surface_count as f64 / 3.0).round() as usize)
        .max(2)
        .min(surface.len().max(1));

    let mut rest: Vec<&'static BiomeRecord> = surface
        .iter()
        .copied()
        .filter(|biome| biome.id != COASTAL_BIOME)
        .collect();
    let mut pool = vec![coastal];
    while pool.len() < size {
        let Some(pick) = random.pick_index(rest.len()) else {
            break;
        };
        pool.push(rest.remove(pick));
    }
    pool
}

/// Computes the [`Site`] of every surface cell (index 1 onward).
pub(super) fn surface_sites(blob: &Blob) -> Vec<Site> {
    let surface = &blob.cells[1..];
    if surface.is_empty() {
        return Vec::new();
    }

    let count = surface.len() as f64;
    let cx = surface.iter().map(|cell| f64::from(cell.position.x)).sum::<f64>() / count;
    let cy = surface.iter().map(|cell| f64::from(cell.position.y)).sum::<f64>() / count;
    let distances: Vec<f64> = surface
        .iter()
        .map(|cell| (f64::from(cell.position.x) - cx).abs() + (f64::from(cell.position.y) - cy).abs())
        .collect();
    let max_distance = distances.iter().copied().fold(0.0, f64::max);

    let positions = blob.cells.iter().map(|cell| cell.position);
    let min_x = positions.clone().map(|p| p.x).min().unwrap_or(0);
    let max_x = positions.clone().map(|p| p.x).max().unwrap_or(0);
    let min_y = positions.clone().map(|p| p.y).min().unwrap_or(0);
    let max_y = positions.map(|p| p.y).max().unwrap_or(0);

    surface
        .iter()
        .zip(distances)
        .map(|(cell, distance)| Site {
            norm: if max_distance > 0.0 {
                distance / max_distance
            } else {
                0.0
            },
            edge: cell.position.x == min_x
                || cell.position.x == max_x
                || cell.position.y == min_y
                || cell.position.y == max_y,
        })
        .collect()
}

/// Assigns a biome to every surface cell of `blob`.
///
/// Draw order: pool draws, then one roulette draw per cell, then one per cell
/// for each smoothing pass. Smoothing reads the previous pass's assignment,
/// so the result does not depend on visit order within a pass.
pub(super) fn assign_weighted<R: RandomSource + ?Sized>(
    blob: &mut Blob,
    surface: &[&'static BiomeRecord],
    passes: u32,
    random: &mut R,
) {
    let surface_count = blob.cells.len().saturating_sub(1);
    if surface_count == 0 {
        return;
    }

    let pool = build_pool(surface, surface_count, random);
    let bias = bias_strength(surface_count);
    let base: Vec<Vec<f64>> = surface_sites(blob)
        .into_iter()
        .map(|site| {
            pool.iter()
                .map(|biome| placement_weight(biome.placement, site, bias))
                .collect()
        })
        .collect();
    tracing::debug!(
        "biome pool {:?} (bias {:.2})",
        pool.iter().map(|biome| biome.id).collect::<Vec<_>>(),
        bias
    );

    let mut choice: Vec<usize> = base
        .iter()
        .map(|weights| random.pick_weighted(weights).unwrap_or(0))
        .collect();

    // Surface neighbours only; the ship's dock biome is never pooled.
    let adjacency: Vec<Vec<usize>> = (1..blob.cells.len())
        .map(|index| {
            blob.neighbor_indices(index)
                .into_iter()
                .filter(|neighbor| *neighbor != 0)
                .map(|neighbor| neighbor - 1)
                .collect()
        })
        .collect();

    for _ in 0..passes {
        let previous = choice.clone();
        for (slot, weights) in base.iter().enumerate() {
            let mut weights = weights.clone();
            let holders = adjacency[slot].iter().map(|neighbor| previous[*neighbor]);
            for picked in holders.chain(std::iter::once(previous[slot])) {
                weights[picked] *= NEIGHBOR_GAIN;
            }
            choice[slot] = random.pick_weighted(&weights).unwrap_or(previous[slot]);
        }
    }

    for (cell, picked) in blob.cells[1..].iter_mut().zip(choice) {
        cell.biome = Some(pool[picked]);
    }
}
