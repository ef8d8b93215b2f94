//! Generate an island and print it.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use island_core::{Island, resolve_biome};

use super::{IslandArgs, LoadedIsland};
use crate::config::CliConfig;
use crate::render::ascii_map;

/// Generate an island and print it
#[derive(Parser, Debug)]
pub struct Generate {
    #[command(flatten)]
    island: IslandArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Node list with biomes, features and the fingerprint
    Summary,
    /// Character map only
    Ascii,
    /// Full JSON output
    Json,
}

impl Generate {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let loaded = self.island.load(config)?;

        match self.format {
            OutputFormat::Summary => print_summary(&loaded),
            OutputFormat::Ascii => println!("{}", ascii_map(&loaded.island, None)),
            OutputFormat::Json => print_json(&loaded.island)?,
        }
        Ok(())
    }
}

fn print_summary(loaded: &LoadedIsland) {
    let island = &loaded.island;

    println!("{} {}", style("Island:").bold().cyan(), island.id());
    if let Some(seed) = loaded.seed {
        println!("{} {}", style("Seed:").bold().cyan(), seed);
    }
    println!(
        "{} {}",
        style("Fingerprint:").bold().cyan(),
        hex::encode(island.fingerprint())
    );
    println!(
        "{} {} nodes, {} gems required",
        style("Size:").bold().cyan(),
        island.node_count(),
        island.required_gems()
    );
    println!();

    println!("{}", style("Map:").bold().yellow());
    for line in ascii_map(island, None).lines() {
        println!("  {}", line);
    }
    println!();

    println!("{}", style("Nodes:").bold().yellow());
    for node in island.nodes().values() {
        let features: Vec<&str> = node
            .features
            .iter()
            .map(|feature| feature.title.as_str())
            .collect();
        println!(
            "  {:<14} ({:>2},{:>2}) {:<8} {:<10} {}",
            node.id,
            node.position.x,
            node.position.y,
            node.kind,
            resolve_biome(Some(node.biome.as_str())).title,
            style(features.join(", ")).dim()
        );
    }

    if !island.map_landmarks().is_empty() {
        println!();
        println!("{}", style("Landmarks:").bold().yellow());
        for landmark in island.map_landmarks() {
            println!(
                "  {:<14} ({:>2},{:>2}) {}",
                landmark.id, landmark.position.x, landmark.position.y, landmark.kind
            );
        }
    }
}

fn print_json(island: &Island) -> Result<()> {
    let json =
        serde_json::to_string_pretty(island).context("Failed to serialize island to JSON")?;
    println!("{}", json);
    Ok(())
}
