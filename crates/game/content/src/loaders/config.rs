//! Generator configuration loader.

use std::path::Path;

use island_core::GeneratorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for generator configuration from TOML files.
///
/// Every field is optional; missing fields keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing a GeneratorConfig
    pub fn load(path: &Path) -> LoadResult<GeneratorConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GeneratorConfig> {
        let config: GeneratorConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.min_nodes > config.max_nodes {
            tracing::warn!(
                "min_nodes {} exceeds max_nodes {}; generator will use min_nodes",
                config.min_nodes,
                config.max_nodes
            );
        }
        Ok(config)
    }
}
