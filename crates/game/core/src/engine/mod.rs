//! Action application and progression queries.
//!
//! [`apply_action`] is the authoritative reducer for [`RunState`]. It never
//! mutates its input: the state is cloned, the clone is driven through a
//! [`RunReducer`] and returned together with the toast events the transition
//! produced. Rejected transitions (leaving without enough gems) hand back the
//! original state untouched.

mod reducer;
mod transition;

pub use reducer::RunReducer;

use crate::island::{Action, Island, Node};
use crate::state::RunState;

use transition::Outcome;

/// Informational side effect of a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GameEvent {
    /// Short message for transient display.
    Toast { message: String },
}

impl GameEvent {
    pub fn toast(message: impl Into<String>) -> Self {
        GameEvent::Toast {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GameEvent::Toast { message } => message,
        }
    }
}

/// Next state plus the events emitted on the way there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: RunState,
    pub events: Vec<GameEvent>,
}

impl Transition {
    fn unchanged(state: &RunState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }
}

/// Applies one action id to the run.
///
/// Finished runs and unknown action ids yield the input state with no events.
pub fn apply_action(island: &Island, state: &RunState, action_id: &str) -> Transition {
    if state.is_finished() {
        return Transition::unchanged(state);
    }
    let Some((node, action)) = island.find_action(action_id) else {
        tracing::debug!("ignoring unknown action {action_id}");
        return Transition::unchanged(state);
    };
    let feature = node.feature_for_action(&action.id);

    let mut working = state.clone();
    match transition::dispatch(island, &mut working, action, feature) {
        Outcome::Applied(events) => {
            tracing::debug!(
                "applied {} ({}) at {}: {} event(s)",
                action.id,
                action.kind.name(),
                node.id,
                events.len()
            );
            Transition {
                state: working,
                events,
            }
        }
        Outcome::Rejected(events) => {
            tracing::debug!("rejected {} at {}", action.id, node.id);
            Transition {
                state: state.clone(),
                events,
            }
        }
    }
}

/// Node the player currently occupies, if it exists on this island.
pub fn get_current_node<'a>(island: &'a Island, state: &RunState) -> Option<&'a Node> {
    island.node(&state.current_node_id)
}

/// An action as shown to the player, with its completion flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleAction<'a> {
    pub action: &'a Action,
    /// Always false for movement.
    pub is_completed: bool,
}

/// Every action on `node`, in node order, flagged with completion.
pub fn get_visible_actions<'a>(state: &RunState, node: &'a Node) -> Vec<VisibleAction<'a>> {
    node.actions
        .iter()
        .map(|action| VisibleAction {
            action,
            is_completed: !action.is_move() && state.is_action_completed(&action.id),
        })
        .collect()
}

/// A node is complete when every one of its features is completed. Nodes
/// without features are vacuously complete.
pub fn is_node_completed(node: &Node, state: &RunState) -> bool {
    node.features
        .iter()
        .all(|feature| state.completed_features.contains(&feature.id))
}

/// Number of visited nodes that are complete.
pub fn count_completed_nodes(island: &Island, state: &RunState) -> usize {
    state
        .visited_nodes
        .iter()
        .filter_map(|node_id| island.node(node_id))
        .filter(|node| is_node_completed(node, state))
        .count()
}

/// Formats `count` with a singular or plural noun: "1 gem", "2 gems".
pub fn format_count(count: u32, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}
