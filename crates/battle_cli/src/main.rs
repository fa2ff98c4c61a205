//! Battle CLI
//!
//! 카드 풀 JSON으로 매치를 끝까지 진행하는 로컬 드라이버

use anyhow::{anyhow, bail, Result};
use battle_cli::{load_pool, load_rules, parse_choices, TableOracle};
use battle_core::{BattleEngine, BattleRng, BattleRules, Card, MatchState, MatchWinner};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CLI_PLAYER: &str = "cli";

#[derive(Parser)]
#[command(name = "battle_cli")]
#[command(about = "Play card battle matches from local card pools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full match against the built-in opponent
    Play {
        /// Card pool JSON (array of cards)
        #[arg(long)]
        pool: PathBuf,

        /// Ratings JSON (image_ref -> score or model reply text) used for theme rounds
        #[arg(long)]
        ratings: Option<PathBuf>,

        /// Rules YAML file
        #[arg(long, conflicts_with = "preset")]
        rules: Option<PathBuf>,

        /// Rules preset (standard, quick, stats_only)
        #[arg(long)]
        preset: Option<String>,

        /// RNG seed for reproducible matches
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated card ids to play in order (first playable card otherwise)
        #[arg(long)]
        choices: Option<String>,

        /// Print the final match state as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a rules preset as YAML
    Rules {
        #[arg(long, default_value = "standard")]
        preset: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { pool, ratings, rules, preset, seed, choices, json } => {
            let rules = match (rules, preset) {
                (Some(path), _) => load_rules(&path)?,
                (None, Some(name)) => resolve_preset(&name)?,
                (None, None) => BattleRules::standard(),
            };
            let oracle = match ratings {
                Some(path) => TableOracle::load(&path)?,
                None => TableOracle::default(),
            };
            let choices = match choices {
                Some(raw) => parse_choices(&raw)?,
                None => Vec::new(),
            };

            let mut pools = HashMap::new();
            pools.insert(CLI_PLAYER.to_string(), load_pool(&pool)?);
            info!(pool = %pool.display(), seed = ?seed, "starting match");

            let state = match seed {
                Some(seed) => play_match(BattleEngine::with_seed(rules, oracle, seed)?, &pools, &choices)?,
                None => play_match(BattleEngine::with_entropy(rules, oracle)?, &pools, &choices)?,
            };

            print_result(&state);
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
        }

        Commands::Rules { preset } => {
            print!("{}", resolve_preset(&preset)?.to_yaml_string()?);
        }
    }

    Ok(())
}

fn resolve_preset(name: &str) -> Result<BattleRules> {
    BattleRules::preset(name).ok_or_else(|| anyhow!("Unknown rules preset: {}", name))
}

fn play_match<R: BattleRng>(
    mut engine: BattleEngine<TableOracle, R>,
    pools: &HashMap<String, Vec<Card>>,
    choices: &[u64],
) -> Result<MatchState> {
    let mut state = engine.start_match(CLI_PLAYER, pools)?;
    let mut scripted = choices.iter().copied();

    while !state.is_over() {
        let card_id = match scripted.next() {
            Some(id) => id,
            None => match state.playable_ids().first() {
                Some(id) => *id,
                None => bail!("No playable cards left in round {}", state.round()),
            },
        };

        let outcome = engine.play_round_in_place(&mut state, card_id)?;
        println!("{}", outcome.summary());
    }

    Ok(state)
}

fn print_result(state: &MatchState) {
    let (player1, player2) = state.scores();
    let Some(result) = state.result() else {
        println!("\nMatch unfinished: {} - {}", player1, player2);
        return;
    };

    let headline = match result.winner {
        MatchWinner::Player1 => "You win",
        MatchWinner::Player2 => "Opponent wins",
        MatchWinner::Draw => "Draw",
    };
    println!("\n{} ({} - {}, {:?})", headline, player1, player2, result.reason);
}
