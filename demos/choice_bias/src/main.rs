//! choice_bias: measures how escapes split between two exits.
//!
//! Occupants are resolved in row-major order, so the exit nearer the top-left
//! corner tends to collect slightly more escapes than geometry alone predicts.
//! Runs a batch of replicas, prints per-exit totals and averages, and writes
//! CSV output for replica 0 plus a JSON batch summary to `output/choice_bias/`.
//!
//! Usage: `choice_bias [config.json]`.  Without a config file the 50×50
//! two-exit layout below is used.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use ev_core::{EvacConfig, Pos, SimRng};
use ev_output::{CsvWriter, EvacOutputObserver};
use ev_sim::{AutomatonBuilder, BatchSpec, run_batch};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROWS:              u32 = 50;
const COLS:              u32 = 50;
const EXITS:             [Pos; 2] = [Pos { row: 5, col: 5 }, Pos { row: 49, col: 49 }];
const RUNS:              u64 = 25;
const SEED:              u64 = 42;
const SNAPSHOT_INTERVAL: u64 = 10;

fn load_config(path: Option<&Path>) -> Result<EvacConfig> {
    let Some(path) = path else {
        let mut config = EvacConfig::new(ROWS, COLS, EXITS.to_vec());
        config.seed = SEED;
        config.snapshot_interval = SNAPSHOT_INTERVAL;
        return Ok(config);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EvacConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    config.validate()?;

    println!("=== choice_bias: rust_evac ===");
    println!("Grid: {}x{}  |  Exits: {}  |  Runs: {RUNS}", config.height, config.width, config.exits.len());
    println!();

    // ── Batch ─────────────────────────────────────────────────────────────
    let t0 = Instant::now();
    let summary = run_batch(&BatchSpec::new(config.clone(), RUNS))?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "batch finished");

    println!("Escaped at each exit:");
    for (exit, total) in summary.exits.iter().zip(&summary.total_escapes_per_exit) {
        println!("  exit {exit}: {total} escaped in total");
    }
    println!("Escaped on average at each exit:");
    for (exit, mean) in summary.exits.iter().zip(&summary.mean_escapes_per_exit) {
        println!("  exit {exit}: {mean:.2}");
    }
    println!("Mean generations to evacuate: {:.2}", summary.mean_generations);
    if summary.capped() > 0 {
        println!("{} replicas stopped at the generation cap", summary.capped());
    }

    // ── Output for replica 0 ──────────────────────────────────────────────
    let out_dir = Path::new("output/choice_bias");
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut automaton = AutomatonBuilder::new(config.clone())
        .rng(SimRng::replica(config.seed, 0))
        .build()?;
    let mut observer = EvacOutputObserver::new(CsvWriter::new(out_dir)?);
    let outcome = automaton.run(&mut observer)?;
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing CSV output");
    }

    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(out_dir.join("batch_summary.json"), json)?;

    println!();
    println!(
        "Replica 0: {} people evacuated in {} generations; output in {}",
        outcome.escaped,
        outcome.generations.0,
        out_dir.display()
    );
    Ok(())
}
