//! Hand-authored islands.
//!
//! A [`ManualLayout`] lists nodes with positions and their non-movement
//! actions; [`ManualLayout::build`] validates it and synthesizes movement the
//! same way the generator does. Layout mistakes are content bugs, so they fail
//! fast with a [`LayoutError`].

use std::collections::BTreeSet;

use crate::biome::{DOCK_BIOME, resolve_biome};
use crate::error::{ErrorSeverity, IslandError};
use crate::feature::{FeatureEntry, normalize_feature};
use crate::grid::{Occupancy, Position, movement_actions_for_node};

use super::{Action, ActionKind, GEM_ITEM, Island, MapLandmark, Node, NodeKind, SHIP_NODE_ID};

/// Errors raised while building an island from a layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutError {
    #[error("multiple nodes share the same grid square at {key}: '{first}' and '{second}'")]
    DuplicatePosition {
        key: String,
        first: String,
        second: String,
    },

    #[error("node id '{0}' is used more than once")]
    DuplicateNodeId(String),

    #[error("action id '{0}' is used more than once")]
    DuplicateActionId(String),

    #[error("feature '{feature}' on node '{node}' points at missing action '{action}'")]
    DanglingFeature {
        node: String,
        feature: String,
        action: String,
    },

    #[error("layout has no '{}' start node", SHIP_NODE_ID)]
    MissingStartNode,
}

impl IslandError for LayoutError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use LayoutError::*;
        match self {
            DuplicatePosition { .. } => "LAYOUT_DUPLICATE_POSITION",
            DuplicateNodeId(_) => "LAYOUT_DUPLICATE_NODE_ID",
            DuplicateActionId(_) => "LAYOUT_DUPLICATE_ACTION_ID",
            DanglingFeature { .. } => "LAYOUT_DANGLING_FEATURE",
            MissingStartNode => "LAYOUT_MISSING_START_NODE",
        }
    }
}

/// One authored node. Movement actions are never authored; they are derived
/// from positions at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManualNode {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: NodeKind,
    pub biome: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<FeatureEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<Action>,
}

impl ManualNode {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        biome: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Path,
            biome: biome.into(),
            color: None,
            position,
            features: Vec::new(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Adds an action together with a feature of `feature_type` anchored to it.
    #[must_use]
    pub fn with_featured_action(mut self, action: Action, feature_type: &str) -> Self {
        let (item, amount) = match &action.kind {
            ActionKind::Pickup { item, amount } => (Some(item.clone()), *amount),
            _ => (None, None),
        };
        self.features.push(FeatureEntry {
            id: Some(format!("{}_feature", action.id)),
            kind: Some(feature_type.to_string()),
            action_id: Some(action.id.clone()),
            item,
            amount,
            ..FeatureEntry::default()
        });
        self.actions.push(action);
        self
    }
}

/// A complete hand-authored island description.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManualLayout {
    pub id: String,
    /// Gems needed to leave. Defaults to the number of gem pickups.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_gems: Option<u32>,
    pub nodes: Vec<ManualNode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub map_landmarks: Vec<MapLandmark>,
}

impl ManualLayout {
    /// The built-in three-node surface: ship, beach and cave, two gems.
    pub fn surface() -> Self {
        let gem = |id: &str| {
            Action::new(
                id,
                "Pick Up Gem",
                ActionKind::Pickup {
                    item: GEM_ITEM.into(),
                    amount: Some(1),
                },
            )
        };

        Self {
            id: "manual-grid-v1".into(),
            required_gems: Some(2),
            nodes: vec![
                ManualNode::new(SHIP_NODE_ID, "Ship", DOCK_BIOME, Position::new(0, 1))
                    .with_kind(NodeKind::Start)
                    .with_color("#4c6ef5")
                    .with_featured_action(
                        Action::new("ship_leave", "Sail Away", ActionKind::Ship),
                        "ship",
                    ),
                ManualNode::new("beach", "Beach", "beach", Position::new(0, 0))
                    .with_color("#fbbf24")
                    .with_featured_action(gem("beach_pick_gem"), "gem"),
                ManualNode::new("cave", "Cave Entrance", "cave", Position::new(1, 0))
                    .with_kind(NodeKind::Feature)
                    .with_color("#94a3b8")
                    .with_featured_action(gem("cave_pick_gem"), "gem"),
            ],
            map_landmarks: Vec::new(),
        }
    }

    /// Validates the layout and produces an island.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] for duplicate positions, node ids or action
    /// ids, features pointing at missing actions, or a missing ship node.
    pub fn build(&self) -> Result<Island, LayoutError> {
        let mut occupancy = Occupancy::new();
        let mut ids = BTreeSet::new();
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(LayoutError::DuplicateNodeId(node.id.clone()));
            }
            if let Some(first) = occupancy.insert(node.position, node.id.clone()) {
                return Err(LayoutError::DuplicatePosition {
                    key: node.position.key(),
                    first,
                    second: node.id.clone(),
                });
            }
        }
        if !ids.contains(SHIP_NODE_ID) {
            return Err(LayoutError::MissingStartNode);
        }

        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut action_ids = BTreeSet::new();
        for authored in &self.nodes {
            let mut node = Node::new(
                authored.id.clone(),
                authored.title.clone(),
                authored.biome.clone(),
                authored.position,
            );
            node.kind = authored.kind;
            node.color = authored
                .color
                .clone()
                .or_else(|| Some(resolve_biome(Some(authored.biome.as_str())).dominant_color.into()));
            node.features = authored
                .features
                .iter()
                .filter_map(|entry| normalize_feature(Some(entry)))
                .collect();

            let movement = movement_actions_for_node(&node, &occupancy);
            node.actions = movement
                .into_iter()
                .chain(authored.actions.iter().cloned())
                .collect();

            for action in &node.actions {
                if !action_ids.insert(action.id.clone()) {
                    return Err(LayoutError::DuplicateActionId(action.id.clone()));
                }
            }
            for feature in &node.features {
                if let Some(action_id) = &feature.action_id
                    && node.action(action_id).is_none()
                {
                    return Err(LayoutError::DanglingFeature {
                        node: node.id.clone(),
                        feature: feature.id.clone(),
                        action: action_id.clone(),
                    });
                }
            }
            nodes.push(node);
        }

        let required_gems = self.required_gems.unwrap_or_else(|| {
            nodes
                .iter()
                .flat_map(|node| node.actions.iter())
                .filter(|action| action.is_gem_pickup())
                .count() as u32
        });

        tracing::debug!(
            "built manual island '{}' with {} nodes, {} required gems",
            self.id,
            nodes.len(),
            required_gems
        );

        Ok(Island::new(
            self.id.clone(),
            required_gems,
            nodes,
            self.map_landmarks.clone(),
        ))
    }
}

/// Builds the fixed hand-authored island.
///
/// # Panics
///
/// Panics if the built-in layout is invalid, which the layout tests rule out.
pub fn create_manual_island() -> Island {
    ManualLayout::surface()
        .build()
        .expect("built-in manual layout must be valid")
}
