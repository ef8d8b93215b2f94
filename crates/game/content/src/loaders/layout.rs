//! Hand-authored layout loader.
//!
//! Layout files are RON encodings of [`ManualLayout`]. Movement actions are
//! never written in the file; they are derived from node positions when the
//! layout is built.

use std::path::Path;

use island_core::{Island, IslandError, ManualLayout};

use crate::loaders::{LoadResult, read_file};

/// Built-in three-node surface, the same island as `create_manual_island`.
const SURFACE_RON: &str = include_str!("../../data/layouts/surface.ron");

/// Loader for island layouts from RON files.
pub struct LayoutLoader;

impl LayoutLoader {
    /// Load and build an island from a RON layout file.
    pub fn load(path: &Path) -> LoadResult<Island> {
        let layout = Self::load_layout(path)?;
        Self::build(&layout)
    }

    /// Load a layout without building it.
    pub fn load_layout(path: &Path) -> LoadResult<ManualLayout> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a layout from RON text.
    pub fn parse(content: &str) -> LoadResult<ManualLayout> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse layout RON: {}", e))
    }

    /// Validates a layout, tagging failures with the layout id, severity and
    /// error code.
    pub fn build(layout: &ManualLayout) -> LoadResult<Island> {
        layout.build().map_err(|e| {
            anyhow::anyhow!(
                "Invalid layout '{}' [{} {}]: {}",
                layout.id,
                e.severity().as_str(),
                e.error_code(),
                e
            )
        })
    }

    /// The embedded surface layout.
    pub fn builtin() -> LoadResult<Island> {
        Self::build(&Self::parse(SURFACE_RON)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use island_core::create_manual_island;

    #[test]
    fn builtin_surface_matches_manual_island() {
        let island = LayoutLoader::builtin().expect("embedded layout is valid");
        assert_eq!(island, create_manual_island());
        assert_eq!(island.fingerprint(), create_manual_island().fingerprint());
    }

    #[test]
    fn duplicate_positions_are_reported_with_code() {
        let content = r#"(
            id: "broken",
            nodes: [
                (id: "ship", title: "Ship", biome: "dock", position: (x: 0, y: 0)),
                (id: "beach", title: "Beach", biome: "beach", position: (x: 0, y: 0)),
            ],
        )"#;
        let layout = LayoutLoader::parse(content).unwrap();
        let error = LayoutLoader::build(&layout).unwrap_err().to_string();
        assert!(error.contains("LAYOUT_DUPLICATE_POSITION"), "{error}");
        assert!(error.contains("0,0"), "{error}");
    }
}
