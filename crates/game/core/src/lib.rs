//! Deterministic island generation and run progression.
//!
//! `island-core` defines the canonical island model (nodes, actions, features),
//! the procedural [`generator`], the hand-authored [`island::manual`] layouts
//! and the [`engine`] that advances a [`RunState`]. Everything here is pure:
//! randomness is injected through [`RandomSource`] and no function performs
//! I/O, so loaders and clients can reuse these APIs directly.
pub mod biome;
pub mod config;
pub mod engine;
pub mod error;
pub mod feature;
pub mod generator;
pub mod grid;
pub mod island;
pub mod prompt;
pub mod rng;
pub mod state;

pub use biome::{BiomeRecord, FALLBACK_BIOME, list_biomes, resolve_biome, resolve_node_color};
pub use config::{BiomeMode, GeneratorConfig};
pub use engine::{
    GameEvent, Transition, VisibleAction, apply_action, count_completed_nodes, format_count,
    get_current_node, get_visible_actions, is_node_completed,
};
pub use error::{ErrorSeverity, IslandError};
pub use feature::{
    Feature, FeatureCategory, FeatureEntry, FeatureKind, normalize_feature, normalize_features,
};
pub use generator::{generate_island, ship_start_position};
pub use grid::{Bounds, BoundsSpec, Direction, Position, coordinate_key};
pub use island::{
    Action, ActionKind, Island, LandmarkKind, LayoutError, ManualLayout, ManualNode, MapLandmark,
    Node, NodeKind, create_manual_island,
};
pub use prompt::{PromptError, PromptService, PromptSource, PromptTrainer, TypingBuffer};
pub use rng::{PcgRandom, RandomError, RandomSource, SequenceRandom};
pub use state::{RunState, RunStatus, create_initial_state};
