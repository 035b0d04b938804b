//! Command-line driver: reads one game-state JSON document per stdin line,
//! prints the decision for every turn of the agent.
//!
//! ```text
//! echo '{"hand":["As","Ks"],"community":["Qs","Js","Ts"],"num_opponents":2,"stack":500,"your_turn":true}' \
//!     | RUST_LOG=pokerai=debug pokerai --time-budget-ms 250
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pokerai_engine::{DecisionEngine, EngineConfig, EngineError, HandRanks};

#[derive(Parser, Debug)]
#[command(name = "pokerai", about = "Monte Carlo poker decision engine", version)]
struct Args {
    /// JSON config file (EngineConfig layout)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads per round
    #[arg(short, long)]
    workers: Option<usize>,

    /// Per-worker simulation time in milliseconds
    #[arg(short, long)]
    time_budget_ms: Option<u64>,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(budget) = args.time_budget_ms {
        config.time_budget_ms = budget;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    log::info!("Initializing poker tables...");
    let mut engine = DecisionEngine::new(config, HandRanks::new()).context("starting engine")?;
    log::info!("Poker client running");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("reading game state")?;
        if line.trim().is_empty() {
            continue;
        }

        let document: serde_json::Value = match serde_json::from_str(&line) {
            Ok(document) => document,
            Err(e) => {
                log::error!("Could not load game state: {e}");
                continue;
            }
        };
        if let Err(e) = engine.update_game_state(&document) {
            log::error!("Rejected game state: {e}");
            continue;
        }
        if !engine.my_turn() {
            continue;
        }

        match engine.best_action() {
            Ok(_) => {}
            Err(EngineError::DegenerateRound) => {
                log::warn!("No playouts completed; skipping this turn");
                continue;
            }
            Err(e) => return Err(e.into()),
        }
        engine.write_action(&mut stdout)?;
        writeln!(stdout, "{}", engine.action_string())?;
        stdout.flush()?;
    }

    Ok(())
}
