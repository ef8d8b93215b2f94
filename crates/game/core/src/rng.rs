//! Injected randomness for deterministic generation.
//!
//! Nothing in this crate reads ambient random state. Every random decision is
//! drawn from a caller-supplied [`RandomSource`], which is what makes island
//! generation and prompt selection reproducible.
//!
//! # Determinism
//!
//! Given the same sequence of values from the source, every consumer in this
//! crate makes the same decisions in the same order and consumes the same
//! number of draws per decision.

use crate::error::{ErrorSeverity, IslandError};

/// Source of uniformly distributed floats in `[0, 1)`.
///
/// Any `FnMut() -> f64` closure is a source, so callers can pass a plain
/// callback. Out-of-range values are clamped rather than trusted.
pub trait RandomSource {
    /// Draws the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Draws an index in `0..len`, or returns `None` without drawing when the
    /// range is empty.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let value = unit(self.next_f64());
        Some(((value * len as f64) as usize).min(len - 1))
    }

    /// Draws an integer in `[min, max]` inclusive.
    ///
    /// When `min >= max` this returns `min` without consuming a draw.
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = (max - min) as usize + 1;
        let offset = self.pick_index(span).unwrap_or(0);
        min + offset as u32
    }

    /// Roulette-wheel selection over `weights`.
    ///
    /// Negative and non-finite weights count as zero and are never picked
    /// while any weight is positive. Returns `None` without drawing when
    /// `weights` is empty; when every weight is zero, falls back to a uniform
    /// index. Always consumes exactly one draw otherwise.
    fn pick_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }
        let total: f64 = weights.iter().copied().map(sanitize_weight).sum();
        if total <= 0.0 {
            return self.pick_index(weights.len());
        }

        let mut threshold = unit(self.next_f64()) * total;
        let mut last = 0;
        for (index, weight) in weights.iter().copied().map(sanitize_weight).enumerate() {
            if weight <= 0.0 {
                continue;
            }
            last = index;
            threshold -= weight;
            if threshold <= 0.0 {
                return Some(index);
            }
        }
        Some(last)
    }
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Clamps a drawn value into `[0, 1]`, mapping NaN and infinities to zero.
pub(crate) fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() { weight.max(0.0) } else { 0.0 }
}

/// Seeded PCG random source (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR output permutation over a 64-bit LCG state and turns
/// each 32-bit output into a float in `[0, 1)`.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces the same stream
/// - **Fast**: Single multiply + xorshift + rotate per draw
/// - **Small state**: Only 64 bits
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRandom {
    state: u64,
}

impl PcgRandom {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    ///
    /// The seed is avalanched first so that neighbouring seeds (1, 2, 3...)
    /// start from unrelated states.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generates the next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

impl RandomSource for PcgRandom {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// SplitMix64-style avalanche so small seeds spread across the state space.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed ^ 0x9e3779b97f4a7c15;
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

/// Errors raised when building a scripted random source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RandomError {
    #[error("random sequence must contain at least one value")]
    EmptySequence,
}

impl IslandError for RandomError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RandomError::EmptySequence => "RANDOM_EMPTY_SEQUENCE",
        }
    }
}

/// Scripted source that cycles through a fixed list of values.
///
/// Handy for pinning a generator run to an exact sequence of decisions.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRandom {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Result<Self, RandomError> {
        if values.is_empty() {
            return Err(RandomError::EmptySequence);
        }
        Ok(Self { values, index: 0 })
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgRandom::from_seed(42);
        let mut b = PcgRandom::from_seed(42);
        let mut c = PcgRandom::from_seed(43);

        let first: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let second: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        let other: Vec<u32> = (0..8).map(|_| c.next_u32()).collect();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn pcg_floats_stay_in_unit_interval() {
        let mut rng = PcgRandom::from_seed(7);
        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn closures_are_random_sources() {
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            0.5
        };
        assert_eq!(source.pick_index(4), Some(2));
        assert_eq!(source.range_inclusive(6, 8), 7);
        drop(source);
        assert_eq!(calls, 2);
    }

    #[test]
    fn pick_index_clamps_out_of_range_values() {
        let mut high = || 1.0;
        assert_eq!(high.pick_index(3), Some(2));

        let mut nan = || f64::NAN;
        assert_eq!(nan.pick_index(3), Some(0));

        let mut negative = || -0.5;
        assert_eq!(negative.pick_index(3), Some(0));
    }

    #[test]
    fn empty_ranges_do_not_draw() {
        let mut source = SequenceRandom::new(vec![0.9]).unwrap();
        assert_eq!(source.pick_index(0), None);
        assert_eq!(source.range_inclusive(5, 5), 5);
        assert_eq!(source.range_inclusive(9, 3), 9);
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn weighted_pick_walks_cumulative_weights() {
        let weights = [1.0, 0.0, 3.0];
        let mut zero = || 0.0;
        assert_eq!(zero.pick_weighted(&[0.0, 2.0]), Some(1));
        let mut low = || 0.2;
        assert_eq!(low.pick_weighted(&weights), Some(0));
        let mut high = || 0.3;
        assert_eq!(high.pick_weighted(&weights), Some(2));
        let mut top = || 0.999;
        assert_eq!(top.pick_weighted(&weights), Some(2));
    }

    #[test]
    fn weighted_pick_degrades_gracefully() {
        let mut source = SequenceRandom::new(vec![0.6]).unwrap();
        assert_eq!(source.pick_weighted(&[]), None);
        assert_eq!(source.draws(), 0);

        // All-zero (or invalid) weights fall back to a uniform index.
        assert_eq!(source.pick_weighted(&[0.0, -2.0, f64::NAN]), Some(1));
        assert_eq!(source.draws(), 1);
    }

    #[test]
    fn sequence_cycles_and_rejects_empty_input() {
        let mut source = SequenceRandom::new(vec![0.1, 0.2]).unwrap();
        assert_eq!(source.next_f64(), 0.1);
        assert_eq!(source.next_f64(), 0.2);
        assert_eq!(source.next_f64(), 0.1);
        assert_eq!(source.draws(), 3);

        assert_eq!(
            SequenceRandom::new(Vec::new()),
            Err(RandomError::EmptySequence)
        );
    }
}
