//! Biome lookup table.
//!
//! Biomes are addressed by string id so that content files and future biome
//! additions never break generation or rendering: an unknown id resolves to
//! [`FALLBACK_BIOME`] instead of failing.

use crate::island::Node;

/// Id of the start/dock biome, excluded from surface sampling.
pub const DOCK_BIOME: &str = "dock";

/// Biome that the weighted generator always includes in its pool.
pub const COASTAL_BIOME: &str = "beach";

/// How a biome prefers to be placed by the weighted generator.
///
/// `norm` below is a node's distance from the surface centroid divided by the
/// largest such distance, so `0.0` is the centre and `1.0` the rim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BiomePlacement {
    /// Grows with distance and touching the occupied rectangle's perimeter.
    Coastal,
    /// Grows toward the centre.
    Elevated,
    /// Bell curve peaking between centre and rim.
    Midland,
    /// Rises linearly toward the rim, without the perimeter bonus.
    Outer,
    /// Flat weight regardless of position.
    Uniform,
}

/// Decorative colours consumed by renderers. Not used by game logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BiomePalette {
    pub path_color: &'static str,
    pub path_outline: &'static str,
    pub texture_color: &'static str,
    pub accent_color: &'static str,
    pub edge_color: Option<&'static str>,
    pub wave_color: Option<&'static str>,
}

impl BiomePalette {
    const PLAIN: Self = Self {
        path_color: "rgba(15, 23, 42, 0.45)",
        path_outline: "rgba(15, 23, 42, 0.7)",
        texture_color: "#e2e8f0",
        accent_color: "#cbd5e1",
        edge_color: None,
        wave_color: None,
    };
}

/// Descriptive record for one biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BiomeRecord {
    pub id: &'static str,
    pub title: &'static str,
    pub dominant_color: &'static str,
    pub placement: BiomePlacement,
    pub palette: BiomePalette,
}

impl BiomeRecord {
    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_BIOME.id
    }
}

/// Record returned for unknown or missing ids.
pub const FALLBACK_BIOME: BiomeRecord = BiomeRecord {
    id: "fallback",
    title: "Default",
    dominant_color: "#0b1220",
    placement: BiomePlacement::Uniform,
    palette: BiomePalette::PLAIN,
};

static BIOMES: [BiomeRecord; 7] = [
    BiomeRecord {
        id: DOCK_BIOME,
        title: "Dock",
        dominant_color: "#4c6ef5",
        placement: BiomePlacement::Uniform,
        palette: BiomePalette {
            path_color: "rgba(15, 23, 42, 0.45)",
            path_outline: "rgba(15, 23, 42, 0.7)",
            texture_color: "#bfdbfe",
            accent_color: "#c7d2fe",
            edge_color: Some("#1d4ed8"),
            wave_color: None,
        },
    },
    BiomeRecord {
        id: COASTAL_BIOME,
        title: "Beach",
        dominant_color: "#fcd34d",
        placement: BiomePlacement::Coastal,
        palette: BiomePalette {
            path_color: "rgba(146, 64, 14, 0.55)",
            path_outline: "rgba(0, 0, 0, 0.35)",
            texture_color: "#f59e0b",
            accent_color: "#fde68a",
            edge_color: None,
            wave_color: Some("#38bdf8"),
        },
    },
    BiomeRecord {
        id: "cave",
        title: "Cave",
        dominant_color: "#94a3b8",
        placement: BiomePlacement::Outer,
        palette: BiomePalette {
            path_color: "rgba(15, 23, 42, 0.45)",
            path_outline: "rgba(2, 6, 23, 0.7)",
            texture_color: "#cbd5f5",
            accent_color: "#64748b",
            edge_color: Some("#475569"),
            wave_color: None,
        },
    },
    BiomeRecord {
        id: "forest",
        title: "Forest",
        dominant_color: "#15803d",
        placement: BiomePlacement::Midland,
        palette: BiomePalette {
            path_color: "rgba(20, 83, 45, 0.5)",
            path_outline: "rgba(5, 46, 22, 0.7)",
            texture_color: "#4ade80",
            accent_color: "#bbf7d0",
            edge_color: Some("#166534"),
            wave_color: None,
        },
    },
    BiomeRecord {
        id: "meadow",
        title: "Meadow",
        dominant_color: "#84cc16",
        placement: BiomePlacement::Uniform,
        palette: BiomePalette {
            path_color: "rgba(101, 163, 13, 0.45)",
            path_outline: "rgba(54, 83, 20, 0.6)",
            texture_color: "#d9f99d",
            accent_color: "#fef08a",
            edge_color: None,
            wave_color: None,
        },
    },
    BiomeRecord {
        id: "highlands",
        title: "Highlands",
        dominant_color: "#a16207",
        placement: BiomePlacement::Elevated,
        palette: BiomePalette {
            path_color: "rgba(120, 53, 15, 0.5)",
            path_outline: "rgba(69, 26, 3, 0.7)",
            texture_color: "#fcd9a8",
            accent_color: "#f5f5f4",
            edge_color: Some("#78350f"),
            wave_color: None,
        },
    },
    BiomeRecord {
        id: "marsh",
        title: "Marsh",
        dominant_color: "#0f766e",
        placement: BiomePlacement::Outer,
        palette: BiomePalette {
            path_color: "rgba(17, 94, 89, 0.5)",
            path_outline: "rgba(4, 47, 46, 0.7)",
            texture_color: "#99f6e4",
            accent_color: "#5eead4",
            edge_color: None,
            wave_color: Some("#2dd4bf"),
        },
    },
];

/// Resolves a biome id. Unknown or missing ids return [`FALLBACK_BIOME`].
pub fn resolve_biome(id: Option<&str>) -> &'static BiomeRecord {
    id.and_then(|id| BIOMES.iter().find(|biome| biome.id == id))
        .unwrap_or(&FALLBACK_BIOME)
}

/// Every known biome, dock included, in table order.
pub fn list_biomes() -> &'static [BiomeRecord] {
    &BIOMES
}

/// Biomes eligible for surface nodes (everything but the dock).
pub fn surface_biomes() -> impl Iterator<Item = &'static BiomeRecord> {
    BIOMES.iter().filter(|biome| biome.id != DOCK_BIOME)
}

/// Colour to draw for a node: an explicit node colour always wins.
pub fn resolve_node_color(node: &Node) -> &str {
    match node.color.as_deref() {
        Some(color) if !color.is_empty() => color,
        _ => resolve_biome(Some(node.biome.as_str())).dominant_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    #[test]
    fn unknown_ids_fall_back() {
        assert!(resolve_biome(Some("lava-field")).is_fallback());
        assert!(resolve_biome(None).is_fallback());
        assert_eq!(resolve_biome(Some("cave")).title, "Cave");
    }

    #[test]
    fn surface_pool_excludes_dock() {
        assert!(surface_biomes().all(|biome| biome.id != DOCK_BIOME));
        assert_eq!(surface_biomes().count(), list_biomes().len() - 1);
        assert!(surface_biomes().any(|biome| biome.id == COASTAL_BIOME));
    }

    #[test]
    fn explicit_node_color_wins() {
        let mut node = Node::new("n", "Cave", "cave", Position::ORIGIN);
        assert_eq!(resolve_node_color(&node), "#94a3b8");

        node.color = Some("#ff0000".into());
        assert_eq!(resolve_node_color(&node), "#ff0000");

        node.color = Some(String::new());
        node.biome = "nowhere".into();
        assert_eq!(resolve_node_color(&node), FALLBACK_BIOME.dominant_color);
    }
}
