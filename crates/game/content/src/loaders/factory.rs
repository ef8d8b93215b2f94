//! Content factory rooted at a data directory.

use std::path::{Path, PathBuf};

use island_core::{FeatureEntry, GeneratorConfig, Island};

use crate::loaders::{ConfigLoader, FeatureLoader, LayoutLoader, LoadResult};

/// Generator config file name inside the data directory.
pub const CONFIG_FILE: &str = "generator.toml";
/// Feature catalogue file name inside the data directory. Optional.
pub const FEATURES_FILE: &str = "features.json";
/// Subdirectory holding `<name>.ron` layouts.
pub const LAYOUTS_DIR: &str = "layouts";

/// Resolves content files relative to one data directory.
///
/// # Directory layout
///
/// ```text
/// data/
///   generator.toml
///   features.json
///   layouts/
///     surface.ron
///     cove.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the generator config, or the defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<GeneratorConfig> {
        let path = self.data_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, self.data_dir.display());
            return Ok(GeneratorConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load and build the layout stored as `layouts/<name>.ron`, exactly as
    /// authored.
    pub fn load_layout(&self, name: &str) -> LoadResult<Island> {
        LayoutLoader::load(&self.layout_path(name))
    }

    /// Load the layout stored as `layouts/<name>.ron`, dress its features
    /// from the catalogue, then build it.
    pub fn load_island(&self, name: &str) -> LoadResult<Island> {
        let mut layout = LayoutLoader::load_layout(&self.layout_path(name))?;
        FeatureLoader::dress_layout(&mut layout, &self.load_catalogue()?);
        LayoutLoader::build(&layout)
    }

    /// Load the feature catalogue, or an empty one when the file is absent.
    pub fn load_catalogue(&self) -> LoadResult<Vec<FeatureEntry>> {
        let path = self.data_dir.join(FEATURES_FILE);
        if !path.exists() {
            tracing::debug!(
                "No {} in {}, layouts stay undressed",
                FEATURES_FILE,
                self.data_dir.display()
            );
            return Ok(Vec::new());
        }
        FeatureLoader::load_catalogue(&path)
    }

    fn layout_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(LAYOUTS_DIR).join(format!("{name}.ron"))
    }
}
