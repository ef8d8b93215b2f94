//! Per-run progression state.
//!
//! A [`RunState`] is created once per run with [`create_initial_state`] and is
//! replaced, never edited in place, by every engine transition. Collections are
//! owned sets, so cloning a state never aliases another holder's data.
use std::collections::BTreeSet;

use crate::island::{Island, SHIP_NODE_ID};

/// Lifecycle of a run. `Success` is terminal; a run cannot be lost.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Playing,
    Success,
}

/// Canonical snapshot of one playthrough.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    /// Node the player currently occupies.
    pub current_node_id: String,
    /// Monotonically non-decreasing during play.
    pub gems_collected: u32,
    /// Action ids that have been used up.
    pub completed_actions: BTreeSet<String>,
    /// Feature ids whose backing action has completed.
    pub completed_features: BTreeSet<String>,
    /// Every node ever occupied, seeded with the start node.
    pub visited_nodes: BTreeSet<String>,
    pub status: RunStatus,
}

impl RunState {
    /// Fresh state with the player standing on `start_node_id`.
    pub fn new(start_node_id: impl Into<String>) -> Self {
        let start_node_id = start_node_id.into();
        Self {
            visited_nodes: BTreeSet::from([start_node_id.clone()]),
            current_node_id: start_node_id,
            gems_collected: 0,
            completed_actions: BTreeSet::new(),
            completed_features: BTreeSet::new(),
            status: RunStatus::Playing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == RunStatus::Success
    }

    pub fn is_action_completed(&self, action_id: &str) -> bool {
        self.completed_actions.contains(action_id)
    }

    pub fn has_visited(&self, node_id: &str) -> bool {
        self.visited_nodes.contains(node_id)
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(SHIP_NODE_ID)
    }
}

/// Creates the state for a new run on `island`, starting at the ship.
///
/// Islands without a ship node (only possible through hand-edited serialized
/// data) start at their first node in id order.
pub fn create_initial_state(island: &Island) -> RunState {
    let start = island
        .ship()
        .or_else(|| island.nodes().values().next())
        .map_or(SHIP_NODE_ID, |node| node.id.as_str());
    RunState::new(start)
}
