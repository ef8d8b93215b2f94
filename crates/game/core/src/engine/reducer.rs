use crate::feature::Feature;
use crate::state::{RunState, RunStatus};

/// Wraps mutable access to a working copy of [`RunState`].
///
/// The engine clones the caller's state, drives a reducer over the clone and
/// hands the clone back, so the caller's value is never touched.
pub struct RunReducer<'a> {
    state: &'a mut RunState,
}

impl<'a> RunReducer<'a> {
    pub fn new(state: &'a mut RunState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &RunState {
        self.state
    }

    /// Moves the player and records the visit. Returns true on a first visit.
    pub fn enter(&mut self, node_id: &str) -> bool {
        self.state.current_node_id = node_id.to_string();
        self.state.visited_nodes.insert(node_id.to_string())
    }

    /// Marks an action and its linked feature completed.
    ///
    /// Returns false if the action was already completed.
    pub fn complete(&mut self, action_id: &str, feature: Option<&Feature>) -> bool {
        if let Some(feature) = feature {
            self.state.completed_features.insert(feature.id.clone());
        }
        self.state.completed_actions.insert(action_id.to_string())
    }

    /// Adds collected gems and returns the new total.
    pub fn add_gems(&mut self, amount: u32) -> u32 {
        self.state.gems_collected = self.state.gems_collected.saturating_add(amount);
        self.state.gems_collected
    }

    pub fn finish(&mut self) {
        self.state.status = RunStatus::Success;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureKind;

    #[test]
    fn complete_is_idempotent() {
        let mut state = RunState::default();
        let feature = Feature::new("beach_gem", FeatureKind::Gem);
        let mut reducer = RunReducer::new(&mut state);

        assert!(reducer.complete("beach_pick_gem", Some(&feature)));
        assert!(!reducer.complete("beach_pick_gem", Some(&feature)));
        assert_eq!(reducer.state().completed_features.len(), 1);
    }

    #[test]
    fn enter_tracks_first_visits() {
        let mut state = RunState::default();
        let mut reducer = RunReducer::new(&mut state);
        assert!(reducer.enter("beach"));
        assert!(!reducer.enter("beach"));
        assert_eq!(state.current_node_id, "beach");
        assert_eq!(state.visited_nodes.len(), 2);
    }

    #[test]
    fn gem_total_saturates() {
        let mut state = RunState {
            gems_collected: u32::MAX - 1,
            ..RunState::default()
        };
        assert_eq!(RunReducer::new(&mut state).add_gems(5), u32::MAX);
    }
}
