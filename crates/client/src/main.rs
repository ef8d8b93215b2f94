//! Island command-line client.
//!
//! Generates islands from a seed or loads hand-authored layouts, then either
//! prints them or plays them as a line-based typing adventure.
//!
//! ```bash
//! island generate --seed 42 --format ascii
//! island play --layout surface
//! ```

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Generate, Play};
use config::CliConfig;

/// Island generator and typing adventure
#[derive(Parser)]
#[command(name = "island")]
#[command(about = "Generate and explore grid islands", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate an island and print it
    Generate(Generate),

    /// Play an island in the terminal
    Play(Play),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(cmd) => cmd.execute(&config),
        Command::Play(cmd) => cmd.execute(&config),
    }
}

/// Logs go to stderr so that island output on stdout stays pipeable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
