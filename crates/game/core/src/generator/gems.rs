use crate::rng::RandomSource;

/// Extra weight for dead ends (at most one neighbour).
const DEAD_END_BONUS: f64 = 3.0;

/// Number of gems to place among `candidates` surface nodes: half, rounded
/// up, never below one and never above the candidate count.
pub(super) fn gem_target(candidates: usize) -> usize {
    if candidates == 0 {
        return 0;
    }
    candidates.div_ceil(2).clamp(1, candidates)
}

/// Host preference: farther from the ship is better, dead ends get a bonus.
pub(super) fn host_weight(distance_to_ship: u32, neighbor_count: usize) -> f64 {
    let distance = f64::from(distance_to_ship.max(1));
    if neighbor_count <= 1 {
        distance + DEAD_END_BONUS
    } else {
        distance
    }
}

/// Weighted sampling without replacement: one roulette draw per pick, the
/// picked entry leaves the pool. Returns indices into `weights` in pick order.
pub(super) fn sample_without_replacement<R: RandomSource + ?Sized>(
    weights: &[f64],
    count: usize,
    random: &mut R,
) -> Vec<usize> {
    let mut pool: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
    let mut picked = Vec::with_capacity(count.min(pool.len()));
    while picked.len() < count {
        let current: Vec<f64> = pool.iter().map(|(_, weight)| *weight).collect();
        let Some(slot) = random.pick_weighted(&current) else {
            break;
        };
        picked.push(pool.remove(slot).0);
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandom;

    #[test]
    fn target_is_half_rounded_up() {
        assert_eq!(gem_target(0), 0);
        assert_eq!(gem_target(1), 1);
        assert_eq!(gem_target(5), 3);
        assert_eq!(gem_target(7), 4);
    }

    #[test]
    fn dead_ends_and_distance_raise_weight() {
        assert_eq!(host_weight(0, 2), 1.0);
        assert_eq!(host_weight(3, 2), 3.0);
        assert_eq!(host_weight(3, 1), 6.0);
    }

    #[test]
    fn sampling_never_repeats() {
        let mut random = SequenceRandom::new(vec![0.0]).unwrap();
        let picked = sample_without_replacement(&[1.0, 1.0, 1.0], 3, &mut random);
        assert_eq!(picked, vec![0, 1, 2]);

        let mut random = SequenceRandom::new(vec![0.99]).unwrap();
        let picked = sample_without_replacement(&[1.0, 5.0], 4, &mut random);
        assert_eq!(picked, vec![1, 0]);
        assert_eq!(random.draws(), 2);
    }
}
