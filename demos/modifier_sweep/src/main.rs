//! modifier_sweep: average evacuation time across safety-function parameters.
//!
//! Three independent sweeps on a 50×50 grid with exits at (5,5) and (45,45)
//! and seeding confined to the upper-left quadrant:
//!
//! | Sweep             | Values        |
//! |-------------------|---------------|
//! | distance modifier | 2, 3, 4, 5    |
//! | crowd modifier    | 1, 2, 3, 4, 5 |
//! | exit radius       | 1, 6, 11, 16  |
//!
//! Every setting runs the same number of replicas from the same base seed, so
//! the seed grids are shared across settings.  Distance modifiers below 2 are
//! left out: occupants then barely prefer the nearer exit and runs take very
//! long.
//!
//! Usage: `modifier_sweep [base_config.json]`.  Results are also written as
//! JSON to `output/modifier_sweep/sweep.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use ev_core::{EvacConfig, Pos};
use ev_sim::{BatchSpec, run_batch};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROWS:  u32 = 50;
const COLS:  u32 = 50;
const EXITS: [Pos; 2] = [Pos { row: 5, col: 5 }, Pos { row: 45, col: 45 }];
const RUNS:  u64 = 25;
const SEED:  u64 = 7;

const DISTANCE_MODIFIERS: std::ops::Range<u32> = 2..6;
const CROWD_MODIFIERS:    std::ops::Range<u32> = 1..6;
const EXIT_RADII:         std::ops::Range<u32> = 1..20;
const EXIT_RADIUS_STEP:   usize = 5;

fn base_config(path: Option<&Path>) -> Result<EvacConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => {
            let mut config = EvacConfig::new(ROWS, COLS, EXITS.to_vec());
            config.evenly_distributed = false;
            config.seed = SEED;
            Ok(config)
        }
    }
}

/// Mean generations to evacuate for each variant produced by `apply`.
fn sweep<I, F>(base: &EvacConfig, label: &str, values: I, apply: F) -> Result<Vec<(u32, f64)>>
where
    I: IntoIterator<Item = u32>,
    F: Fn(&mut EvacConfig, u32),
{
    println!("\n{label}:");
    let mut rows = Vec::new();
    for value in values {
        let mut config = base.clone();
        apply(&mut config, value);
        let summary = run_batch(&BatchSpec::new(config, RUNS))
            .with_context(|| format!("{label} = {value}"))?;
        println!("  {label} {value:>2}: {:>8.2} mean generations", summary.mean_generations);
        info!(%label, value, mean_generations = summary.mean_generations, "sweep point done");
        rows.push((value, summary.mean_generations));
    }
    Ok(rows)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let base = base_config(config_path.as_deref())?;
    base.validate()?;

    println!("=== modifier_sweep: rust_evac ===");
    println!("Grid: {}x{}  |  Exits: {}  |  Runs per setting: {RUNS}", base.height, base.width, base.exits.len());

    let distance = sweep(&base, "distance modifier", DISTANCE_MODIFIERS, |c, v| {
        c.distance_modifier = v as f64;
    })?;
    let crowd = sweep(&base, "crowd modifier", CROWD_MODIFIERS, |c, v| {
        c.crowd_modifier = v as f64;
    })?;
    let radius = sweep(&base, "exit radius", EXIT_RADII.step_by(EXIT_RADIUS_STEP), |c, v| {
        c.exit_radius = v;
    })?;

    let out_dir = Path::new("output/modifier_sweep");
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let report = json!({
        "runs": RUNS,
        "base": base,
        "distance_modifier": distance,
        "crowd_modifier": crowd,
        "exit_radius": radius,
    });
    fs::write(out_dir.join("sweep.json"), serde_json::to_string_pretty(&report)?)?;
    println!("\nWrote {}", out_dir.join("sweep.json").display());
    Ok(())
}
