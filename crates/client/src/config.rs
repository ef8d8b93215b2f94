//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Defaults applied when the matching command-line flag is absent.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub seed: Option<u64>,
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub layout: Option<String>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ISLAND_SEED` - Generator seed (default: current time)
    /// - `ISLAND_CONFIG` - Generator config TOML file
    /// - `ISLAND_DATA_DIR` - Content directory with generator.toml and layouts/
    /// - `ISLAND_LAYOUT` - Layout RON file or layout name, used instead of generating
    pub fn from_env() -> Self {
        let config = Self {
            seed: read_env::<u64>("ISLAND_SEED"),
            config_path: env::var("ISLAND_CONFIG").ok().map(PathBuf::from),
            data_dir: env::var("ISLAND_DATA_DIR").ok().map(PathBuf::from),
            layout: env::var("ISLAND_LAYOUT").ok().filter(|name| !name.is_empty()),
        };

        if env::var("ISLAND_SEED").is_ok() && config.seed.is_none() {
            tracing::warn!("Ignoring ISLAND_SEED: not an unsigned integer");
        }
        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
