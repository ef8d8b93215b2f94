//! Static island structure: nodes, actions, features and map landmarks.
//!
//! An [`Island`] is immutable once built. The generator and the manual layout
//! builder are the only producers; the engine and renderers only read it.
mod fingerprint;
pub mod manual;

use std::collections::BTreeMap;

use crate::feature::Feature;
use crate::grid::Position;

pub use manual::{LayoutError, ManualLayout, ManualNode, create_manual_island};

/// Id of the ship/start node in every island.
pub const SHIP_NODE_ID: &str = "ship";

/// Item name carried by gem pickups.
pub const GEM_ITEM: &str = "gem";

/// Interaction available at a node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    /// Unique across the whole island.
    pub id: String,
    pub label: String,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, ActionKind::Move { .. })
    }

    /// Destination node for movement actions.
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Move { to } => Some(to),
            _ => None,
        }
    }

    /// True for gem pickups.
    pub fn is_gem_pickup(&self) -> bool {
        matches!(&self.kind, ActionKind::Pickup { item, .. } if item == GEM_ITEM)
    }
}

/// Tagged action variants.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Walk to an adjacent node. Always created in reciprocal pairs.
    Move { to: String },
    /// Collect an item once. A missing amount counts as zero.
    Pickup { item: String, amount: Option<u32> },
    /// Leave the island; gated by the required gem count.
    Ship,
    /// Flavor dialogue.
    Say { line: String },
    /// Restart request; handled by the caller, ignored by the engine.
    Reset,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Structural role of a node, derived from its position in the graph.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// The ship, where every run starts.
    Start,
    /// A node with two or more neighbours.
    #[default]
    Path,
    /// A dead end (at most one neighbour).
    Feature,
}

/// One materialized grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    pub biome: String,
    /// Cached or overriding colour; wins over the biome colour when present.
    pub color: Option<String>,
    pub position: Position,
    pub features: Vec<Feature>,
    /// Movement actions first, then everything else.
    pub actions: Vec<Action>,
}

impl Node {
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

    pub fn action(&self, action_id: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.id == action_id)
    }

    /// Feature anchored to the given action, if any.
    pub fn feature_for_action(&self, action_id: &str) -> Option<&Feature> {
        self.features
            .iter()
            .find(|feature| feature.action_id.as_deref() == Some(action_id))
    }

    pub fn movement_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|action| action.is_move())
    }
}

/// Kinds of decorative, map-only markers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LandmarkKind {
    Lagoon,
    Peak,
    Wreck,
}

/// Non-interactive marker drawn on the map at an unoccupied cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLandmark {
    pub id: String,
    pub kind: LandmarkKind,
    pub position: Position,
}

/// Where an action lives: owning node and index into its action list.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ActionLocation {
    node_id: String,
    index: usize,
}

/// Complete level structure. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "IslandRecord", into = "IslandRecord")
)]
pub struct Island {
    id: String,
    required_gems: u32,
    nodes: BTreeMap<String, Node>,
    map_landmarks: Vec<MapLandmark>,
    /// Derived action-id index, rebuilt whenever an island is constructed.
    action_index: BTreeMap<String, ActionLocation>,
}

impl Island {
    /// Assembles an island and indexes its actions.
    ///
    /// When two actions share an id, the first one in node-id order wins the
    /// index slot; builders are expected to prevent that.
    pub fn new(
        id: impl Into<String>,
        required_gems: u32,
        nodes: impl IntoIterator<Item = Node>,
        map_landmarks: Vec<MapLandmark>,
    ) -> Self {
        let nodes: BTreeMap<String, Node> = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();

        let mut action_index = BTreeMap::new();
        for node in nodes.values() {
            for (index, action) in node.actions.iter().enumerate() {
                action_index
                    .entry(action.id.clone())
                    .or_insert_with(|| ActionLocation {
                        node_id: node.id.clone(),
                        index,
                    });
            }
        }

        Self {
            id: id.into(),
            required_gems,
            nodes,
            map_landmarks,
            action_index,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn required_gems(&self) -> u32 {
        self.required_gems
    }

    pub fn nodes(&self) -> &BTreeMap<String, Node> {
        &self.nodes
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn map_landmarks(&self) -> &[MapLandmark] {
        &self.map_landmarks
    }

    pub fn ship(&self) -> Option<&Node> {
        self.node(SHIP_NODE_ID)
    }

    /// Resolves an action id to its owning node and record.
    pub fn find_action(&self, action_id: &str) -> Option<(&Node, &Action)> {
        let location = self.action_index.get(action_id)?;
        let node = self.nodes.get(&location.node_id)?;
        let action = node.actions.get(location.index)?;
        Some((node, action))
    }

    /// Number of gem pickups across all nodes.
    pub fn gem_pickup_count(&self) -> usize {
        self.nodes
            .values()
            .flat_map(|node| node.actions.iter())
            .filter(|action| action.is_gem_pickup())
            .count()
    }

    /// SHA-256 digest over a canonical encoding of the whole island.
    ///
    /// Equal islands always produce equal digests, which makes the digest a
    /// compact way to compare generator runs.
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint::digest(self)
    }
}

/// Plain serialized form of [`Island`], without the derived index.
#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct IslandRecord {
    id: String,
    required_gems: u32,
    nodes: BTreeMap<String, Node>,
    #[serde(default)]
    map_landmarks: Vec<MapLandmark>,
}

#[cfg(feature = "serde")]
impl From<IslandRecord> for Island {
    fn from(record: IslandRecord) -> Self {
        Island::new(
            record.id,
            record.required_gems,
            record.nodes.into_values(),
            record.map_landmarks,
        )
    }
}

#[cfg(feature = "serde")]
impl From<Island> for IslandRecord {
    fn from(island: Island) -> Self {
        Self {
            id: island.id,
            required_gems: island.required_gems,
            nodes: island.nodes,
            map_landmarks: island.map_landmarks,
        }
    }
}
