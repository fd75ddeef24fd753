//! CLI command definitions

use clap::Parser;
use imposter_domain::{ModelKey, ModelStrategy, OutputFormat, TieBreakPolicy};
use std::path::PathBuf;

/// CLI arguments for imposter
#[derive(Parser, Debug)]
#[command(name = "imposter")]
#[command(author, version, about = "Imposter Arena - LLM players hunt the imposters among them")]
#[command(long_about = r#"
Imposter Arena seats a table of LLM players. Most of them know a secret word,
a few imposters only know its category.

A game has two stages:
1. Clue rounds: every player gives a one-word clue, one at a time, seeing
   every clue given before it
2. Voting rounds: every player votes to eliminate a suspect, seeing the votes
   cast before it in the same round

Civilians win if every imposter is eliminated, otherwise the imposters win.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./imposter.toml     Project-level config (also ./.imposter.toml)
3. ~/.config/imposter/config.toml   Global config

Example:
  imposter --word beach --category nature
  imposter --word harbor --category places --players 6 --imposters 2 --seed 7
  imposter --word piano --category instruments --models haiku,llama,gemini,gpt4o-mini
  imposter --replay runs/game.jsonl --output full
"#)]
pub struct Cli {
    /// Secret word known to the civilians
    #[arg(short, long)]
    pub word: Option<String>,

    /// Category shown to every player (imposters included)
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Number of players at the table
    #[arg(short, long)]
    pub players: Option<usize>,

    /// Number of imposters among the players
    #[arg(short, long)]
    pub imposters: Option<usize>,

    /// Number of clue rounds
    #[arg(long, value_name = "N")]
    pub clue_rounds: Option<u32>,

    /// Number of voting rounds (at most the number of imposters)
    #[arg(long, value_name = "N")]
    pub voting_rounds: Option<u32>,

    /// What happens on a tied vote: no-elimination or first-in-player-order
    #[arg(long, value_name = "POLICY")]
    pub tie_break: Option<TieBreakPolicy>,

    /// Seed for the role and model deal
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use one model for every player
    #[arg(short, long, value_name = "MODEL", conflicts_with = "models")]
    pub model: Option<String>,

    /// One model per seat, in seat order (comma separated)
    #[arg(long, value_name = "MODELS", value_delimiter = ',')]
    pub models: Vec<String>,

    /// Result format: summary, full or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Write the event stream as JSONL to this file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Print the result of a recorded event log instead of playing
    #[arg(long, value_name = "PATH", conflicts_with = "word")]
    pub replay: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Suppress live event output and progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Model strategy requested on the command line, if any
    ///
    /// `--models` deals one model per seat; `--model` gives every seat the
    /// same one.
    pub fn model_strategy(&self) -> Option<ModelStrategy> {
        if !self.models.is_empty() {
            return Some(ModelStrategy::PerSeat {
                models: self
                    .models
                    .iter()
                    .map(|m| ModelKey::new(m.trim()))
                    .collect(),
            });
        }
        self.model.as_deref().map(ModelStrategy::single)
    }

    /// `--models` implies the player count when `--players` is absent
    pub fn player_count(&self) -> Option<usize> {
        self.players
            .or_else(|| (!self.models.is_empty()).then_some(self.models.len()))
    }
}
