use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::PromptSource;

/// How many recently issued prompts are avoided on top of the caller's set.
pub const RECENT_PROMPT_LIMIT: usize = 15;

/// Source draws per fresh assignment before settling for an unchecked draw.
pub const MAX_ATTEMPTS: usize = 60;

/// Assigns prompts to action ids.
///
/// An action keeps its prompt across calls until it is refreshed, reset, or
/// the caller starts avoiding that prompt. Fresh prompts avoid both the
/// caller's set and the last [`RECENT_PROMPT_LIMIT`] issued prompts. A starved
/// source gets [`MAX_ATTEMPTS`] tries, then one unchecked draw, so a collision
/// is possible but the call always terminates.
#[derive(Clone, Debug)]
pub struct PromptService<S> {
    source: S,
    assigned: BTreeMap<String, String>,
    recent: VecDeque<String>,
}

impl<S: PromptSource> PromptService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            assigned: BTreeMap::new(),
            recent: VecDeque::with_capacity(RECENT_PROMPT_LIMIT),
        }
    }

    /// Returns the prompt for `action_id`, drawing a new one when needed.
    pub fn get_prompt(&mut self, action_id: &str, avoid: &BTreeSet<String>) -> String {
        if let Some(prompt) = self.assigned.get(action_id)
            && !avoid.contains(prompt)
        {
            return prompt.clone();
        }

        let prompt = self.roll_unique(avoid);
        tracing::debug!("assigned prompt {prompt:?} to {action_id}");
        self.remember(&prompt);
        self.assigned.insert(action_id.to_string(), prompt.clone());
        prompt
    }

    /// Assigns distinct prompts to every id in order, avoiding `avoid` and
    /// each other.
    pub fn assign_all<'a, I>(&mut self, action_ids: I, avoid: &BTreeSet<String>) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut used = avoid.clone();
        action_ids
            .into_iter()
            .map(|action_id| {
                let prompt = self.get_prompt(action_id, &used);
                used.insert(prompt.clone());
                prompt
            })
            .collect()
    }

    /// Current assignment for `action_id`, without drawing.
    pub fn peek(&self, action_id: &str) -> Option<&str> {
        self.assigned.get(action_id).map(String::as_str)
    }

    /// Forgets one assignment; the next request draws afresh.
    pub fn refresh(&mut self, action_id: &str) {
        self.assigned.remove(action_id);
    }

    /// Forgets every assignment and the recent history.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.recent.clear();
    }

    fn roll_unique(&mut self, avoid: &BTreeSet<String>) -> String {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.source.next_prompt();
            if !avoid.contains(&candidate) && !self.recent.contains(&candidate) {
                return candidate;
            }
        }
        tracing::warn!("no unique prompt after {MAX_ATTEMPTS} attempts, reusing a duplicate");
        self.source.next_prompt()
    }

    fn remember(&mut self, prompt: &str) {
        if self.recent.len() == RECENT_PROMPT_LIMIT {
            self.recent.pop_front();
        }
        self.recent.push_back(prompt.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(prompts: &[&str]) -> impl FnMut() -> String + use<> {
        let prompts: Vec<String> = prompts.iter().map(|prompt| prompt.to_string()).collect();
        let mut index = 0;
        move || {
            let prompt = prompts[index % prompts.len()].clone();
            index += 1;
            prompt
        }
    }

    #[test]
    fn cached_prompt_is_reused_until_refreshed() {
        let mut service = PromptService::new(cycle(&["one", "two", "three"]));
        let none = BTreeSet::new();

        assert_eq!(service.get_prompt("action", &none), "one");
        assert_eq!(service.get_prompt("action", &none), "one");
        assert_eq!(service.peek("action"), Some("one"));

        service.refresh("action");
        assert_eq!(service.get_prompt("action", &none), "two");

        service.reset();
        assert_eq!(service.peek("action"), None);
        assert_eq!(service.get_prompt("action", &none), "three");
    }

    #[test]
    fn avoided_cache_entry_is_replaced() {
        let mut service = PromptService::new(cycle(&["cat", "dog"]));
        let none = BTreeSet::new();
        assert_eq!(service.get_prompt("a1", &none), "cat");

        let avoid = BTreeSet::from(["cat".to_string()]);
        assert_eq!(service.get_prompt("a1", &avoid), "dog");
    }

    #[test]
    fn starved_source_falls_back_to_unchecked_draw() {
        let mut service = PromptService::new(cycle(&["only"]));
        let avoid = BTreeSet::from(["only".to_string()]);
        assert_eq!(service.get_prompt("a1", &avoid), "only");
    }

    #[test]
    fn recent_history_is_bounded() {
        let mut service = PromptService::new(cycle(&["a", "b"]));
        let none = BTreeSet::new();
        for index in 0..40 {
            service.get_prompt(&format!("action_{index}"), &none);
        }
        assert_eq!(service.recent.len(), RECENT_PROMPT_LIMIT);
    }
}
