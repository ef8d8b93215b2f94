use crate::grid::{Bounds, BoundsSpec};

/// How the generator assigns biomes to surface nodes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BiomeMode {
    /// Distance/edge weighted roulette followed by neighbour smoothing.
    #[default]
    Weighted,
    /// One uniform draw per node, made while the node is placed.
    Uniform,
}

/// Island generator configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Rectangle nodes must stay inside. Missing sides use [`Self::DEFAULT_BOUNDS`].
    pub bounds: BoundsSpec,
    pub min_nodes: u32,
    pub max_nodes: u32,
    /// Island id recorded on the output.
    pub id: String,
    pub biome_mode: BiomeMode,
    /// Neighbour smoothing passes in weighted mode.
    pub smoothing_passes: u32,
    /// Whether to place the castaway NPC.
    pub place_npc: bool,
    /// Whether to reserve a landmark cell before expansion.
    pub place_landmark: bool,
}

impl GeneratorConfig {
    pub const DEFAULT_BOUNDS: Bounds = Bounds::new(-1, 2, -1, 2);
    pub const DEFAULT_MIN_NODES: u32 = 6;
    pub const DEFAULT_MAX_NODES: u32 = 8;
    pub const DEFAULT_ID: &'static str = "generated-surface-v1";
    pub const DEFAULT_SMOOTHING_PASSES: u32 = 2;

    pub fn new() -> Self {
        Self {
            bounds: BoundsSpec::default(),
            min_nodes: Self::DEFAULT_MIN_NODES,
            max_nodes: Self::DEFAULT_MAX_NODES,
            id: Self::DEFAULT_ID.to_string(),
            biome_mode: BiomeMode::Weighted,
            smoothing_passes: Self::DEFAULT_SMOOTHING_PASSES,
            place_npc: true,
            place_landmark: true,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: impl Into<BoundsSpec>) -> Self {
        self.bounds = bounds.into();
        self
    }

    #[must_use]
    pub fn with_node_range(mut self, min_nodes: u32, max_nodes: u32) -> Self {
        self.min_nodes = min_nodes;
        self.max_nodes = max_nodes;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_biome_mode(mut self, biome_mode: BiomeMode) -> Self {
        self.biome_mode = biome_mode;
        self
    }

    #[must_use]
    pub fn with_smoothing_passes(mut self, passes: u32) -> Self {
        self.smoothing_passes = passes;
        self
    }

    #[must_use]
    pub fn with_npc(mut self, place_npc: bool) -> Self {
        self.place_npc = place_npc;
        self
    }

    #[must_use]
    pub fn with_landmark(mut self, place_landmark: bool) -> Self {
        self.place_landmark = place_landmark;
        self
    }

    /// Bounds with every missing side filled from the defaults.
    pub fn resolved_bounds(&self) -> Bounds {
        self.bounds.resolve(Self::DEFAULT_BOUNDS)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
