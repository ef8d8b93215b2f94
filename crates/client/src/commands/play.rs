//! Line-based play loop.
//!
//! Every open action at the current node gets a typing prompt. Typing a
//! prompt and pressing enter performs that action.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use console::style;

use island_core::{
    Action, ActionKind, Island, PcgRandom, PromptService, PromptTrainer, RunState, TypingBuffer,
    apply_action, count_completed_nodes, create_initial_state, get_current_node,
    get_visible_actions,
};

use super::IslandArgs;
use crate::config::CliConfig;
use crate::render::ascii_map;

/// Offsets the prompt stream from the island stream for the same seed.
const PROMPT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Play an island in the terminal
#[derive(Parser, Debug)]
pub struct Play {
    #[command(flatten)]
    island: IslandArgs,

    /// Hide the map between turns
    #[arg(long)]
    no_map: bool,
}

impl Play {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let loaded = self.island.load(config)?;
        let island = loaded.island;
        let prompt_seed = loaded.seed.unwrap_or_default() ^ PROMPT_SEED_SALT;

        let mut prompts = PromptService::new(PromptTrainer::letters(PcgRandom::from_seed(
            prompt_seed,
        )));
        let mut typing = TypingBuffer::new();
        let mut state = create_initial_state(&island);

        println!(
            "{} Collect {} and sail away. Type {} to restart, {} to leave.",
            style(island.id()).bold().cyan(),
            island.required_gems(),
            style(":reset").bold(),
            style(":quit").bold()
        );

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            let entries = self.show_turn(&island, &state, &mut prompts)?;

            if state.is_finished() {
                println!("{}", style("You sailed away. Well played!").bold().green());
                break;
            }

            print!("> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            match line.trim() {
                ":quit" => break,
                ":reset" => {
                    restart(&island, &mut state, &mut prompts);
                    continue;
                }
                _ => {}
            }

            typing.push_str(&line);
            let chosen = typing
                .activate(&entries, |entry| entry.1.as_str())
                .map(|(action, _)| *action);

            match chosen {
                Some(action) if matches!(action.kind, ActionKind::Reset) => {
                    restart(&island, &mut state, &mut prompts);
                }
                Some(action) => {
                    let transition = apply_action(&island, &state, &action.id);
                    for event in &transition.events {
                        println!("{}", style(event.message()).yellow());
                    }
                    state = transition.state;
                }
                None => {
                    println!(
                        "{} '{}'",
                        style("No action matches").red(),
                        typing.as_str().trim()
                    );
                    typing.clear();
                }
            }
        }

        println!(
            "{} {} of {} nodes completed, {} gems collected",
            style("Run over:").bold().cyan(),
            count_completed_nodes(&island, &state),
            island.node_count(),
            state.gems_collected
        );
        Ok(())
    }

    /// Prints the current node and returns its open actions with prompts.
    fn show_turn<'a>(
        &self,
        island: &'a Island,
        state: &RunState,
        prompts: &mut PromptService<PromptTrainer<PcgRandom>>,
    ) -> Result<Vec<(&'a Action, String)>> {
        let node = get_current_node(island, state).ok_or_else(|| {
            anyhow::anyhow!("Current node '{}' is not on the island", state.current_node_id)
        })?;

        println!();
        if !self.no_map {
            println!("{}", ascii_map(island, Some(state)));
            println!();
        }
        println!(
            "{} {}/{} gems",
            style(&node.title).bold(),
            state.gems_collected,
            island.required_gems()
        );

        let visible = get_visible_actions(state, node);
        let open: Vec<&Action> = visible
            .iter()
            .filter(|visible| !visible.is_completed)
            .map(|visible| visible.action)
            .collect();
        let assigned = prompts.assign_all(
            open.iter().map(|action| action.id.as_str()),
            &BTreeSet::new(),
        );

        for visible in visible.iter().filter(|visible| visible.is_completed) {
            println!("  {} {}", style("[x]").dim(), style(&visible.action.label).dim());
        }
        let entries: Vec<(&Action, String)> = open.into_iter().zip(assigned).collect();
        for (action, prompt) in &entries {
            println!("  [{}] {}", style(prompt).bold().cyan(), action.label);
        }
        Ok(entries)
    }
}

fn restart(
    island: &Island,
    state: &mut RunState,
    prompts: &mut PromptService<PromptTrainer<PcgRandom>>,
) {
    tracing::info!("Restarting run on '{}'", island.id());
    *state = create_initial_state(island);
    prompts.reset();
}
