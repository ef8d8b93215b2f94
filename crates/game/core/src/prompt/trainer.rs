use crate::rng::RandomSource;

use super::{PromptError, PromptSource};

/// English letter frequencies, the default single-letter prompt pool.
pub const DEFAULT_LETTER_WEIGHTS: [(&str, f64); 26] = [
    ("e", 0.0872),
    ("t", 0.0714),
    ("a", 0.0671),
    ("o", 0.0636),
    ("i", 0.061),
    ("n", 0.0594),
    ("s", 0.0573),
    ("h", 0.0562),
    ("r", 0.0556),
    ("d", 0.0455),
    ("l", 0.0436),
    ("c", 0.0352),
    ("u", 0.0352),
    ("w", 0.0321),
    ("m", 0.0321),
    ("f", 0.0305),
    ("g", 0.0288),
    ("y", 0.0288),
    ("p", 0.0279),
    ("b", 0.0242),
    ("v", 0.019),
    ("k", 0.0166),
    ("x", 0.0072),
    ("j", 0.0061),
    ("q", 0.0048),
    ("z", 0.0038),
];

/// Weighted prompt source driven by an injected [`RandomSource`].
///
/// Each call consumes exactly one draw. Negative or non-finite weights count
/// as zero; if every weight is zero the pick is uniform instead.
#[derive(Clone, Debug)]
pub struct PromptTrainer<R> {
    prompts: Vec<String>,
    weights: Vec<f64>,
    random: R,
}

impl<R: RandomSource> PromptTrainer<R> {
    /// Every prompt weighs the same.
    pub fn uniform<I, S>(prompts: I, random: R) -> Result<Self, PromptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::weighted(prompts.into_iter().map(|prompt| (prompt, 1.0)), random)
    }

    /// Explicit `(prompt, weight)` pairs.
    pub fn weighted<I, S>(entries: I, random: R) -> Result<Self, PromptError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (prompts, weights): (Vec<String>, Vec<f64>) = entries
            .into_iter()
            .map(|(prompt, weight)| {
                let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
                (prompt.into(), weight)
            })
            .unzip();
        if prompts.is_empty() {
            return Err(PromptError::EmptyPool);
        }
        Ok(Self {
            prompts,
            weights,
            random,
        })
    }

    /// Single letters weighted by English frequency.
    pub fn letters(random: R) -> Self {
        Self {
            prompts: DEFAULT_LETTER_WEIGHTS
                .iter()
                .map(|(letter, _)| letter.to_string())
                .collect(),
            weights: DEFAULT_LETTER_WEIGHTS.iter().map(|(_, weight)| *weight).collect(),
            random,
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl<R: RandomSource> PromptSource for PromptTrainer<R> {
    fn next_prompt(&mut self) -> String {
        let index = self
            .random
            .pick_weighted(&self.weights)
            .unwrap_or(self.prompts.len() - 1);
        self.prompts[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandom;

    #[test]
    fn uniform_list_uses_supplied_random() {
        let random = SequenceRandom::new(vec![0.1, 0.9]).unwrap();
        let mut trainer = PromptTrainer::uniform(["alpha", "beta"], random).unwrap();
        assert_eq!(trainer.next_prompt(), "alpha");
        assert_eq!(trainer.next_prompt(), "beta");
    }

    #[test]
    fn empty_pool_is_rejected() {
        let random = SequenceRandom::new(vec![0.5]).unwrap();
        let result = PromptTrainer::uniform(Vec::<String>::new(), random);
        assert_eq!(result.err(), Some(PromptError::EmptyPool));
    }

    #[test]
    fn zero_weight_prompts_are_skipped() {
        let random = SequenceRandom::new(vec![0.0, 0.5, 0.99]).unwrap();
        let mut trainer =
            PromptTrainer::weighted([("never", 0.0), ("always", 2.0), ("bad", -1.0)], random)
                .unwrap();
        for _ in 0..3 {
            assert_eq!(trainer.next_prompt(), "always");
        }
    }

    #[test]
    fn letters_cover_the_alphabet() {
        let mut trainer = PromptTrainer::letters(|| 0.0);
        assert_eq!(trainer.prompts().len(), 26);
        assert_eq!(trainer.next_prompt(), "e");
    }
}
