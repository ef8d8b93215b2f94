//! Subcommands and the island source they share.

mod generate;
mod play;

pub use generate::Generate;
pub use play::Play;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use island_content::{ConfigLoader, ContentFactory, LayoutLoader};
use island_core::{BiomeMode, GeneratorConfig, Island, PcgRandom, generate_island};

use crate::config::CliConfig;

/// Name of the layout that is embedded in the binary.
const BUILTIN_LAYOUT: &str = "surface";

/// Where the island comes from: a seeded generator run or a named layout.
#[derive(clap::Args, Debug)]
pub struct IslandArgs {
    /// Generator seed (defaults to ISLAND_SEED, then the current time)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Generator config TOML file (overrides the data directory's generator.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content directory holding generator.toml, features.json and layouts/
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Play a layout instead of generating: a .ron file, or a name looked up
    /// in <DIR>/layouts ("surface" is built in)
    #[arg(short, long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// Override the configured biome assignment mode (weighted, uniform)
    #[arg(long, value_name = "MODE")]
    biome_mode: Option<BiomeMode>,
}

/// An island plus the seed that produced it, if it was generated.
pub struct LoadedIsland {
    pub island: Island,
    pub seed: Option<u64>,
}

impl IslandArgs {
    pub fn load(&self, config: &CliConfig) -> Result<LoadedIsland> {
        let data_dir = self.data_dir.clone().or_else(|| config.data_dir.clone());
        let factory = data_dir.map(ContentFactory::new);

        if let Some(layout) = self.layout.as_deref().or(config.layout.as_deref()) {
            let island = match &factory {
                _ if is_layout_file(layout) => LayoutLoader::load(Path::new(layout))?,
                Some(factory) => factory.load_island(layout)?,
                None if layout == BUILTIN_LAYOUT => LayoutLoader::builtin()?,
                None => anyhow::bail!(
                    "Layout '{}' needs a content directory (--data-dir or ISLAND_DATA_DIR)",
                    layout
                ),
            };
            tracing::info!("Loaded layout '{}' ({} nodes)", island.id(), island.node_count());
            return Ok(LoadedIsland { island, seed: None });
        }

        let config_path = self.config.as_ref().or(config.config_path.as_ref());
        let mut generator = match (config_path, &factory) {
            (Some(path), _) => ConfigLoader::load(path)?,
            (None, Some(factory)) => factory.load_config()?,
            (None, None) => GeneratorConfig::default(),
        };
        if let Some(mode) = self.biome_mode {
            generator = generator.with_biome_mode(mode);
        }

        let seed = self.seed.or(config.seed).unwrap_or_else(time_seed);
        tracing::info!("Generating island with seed {}", seed);

        let island = generate_island(&generator, &mut PcgRandom::from_seed(seed));
        Ok(LoadedIsland {
            island,
            seed: Some(seed),
        })
    }
}

fn is_layout_file(layout: &str) -> bool {
    let path = Path::new(layout);
    path.extension().is_some_and(|ext| ext == "ron") || path.is_file()
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
