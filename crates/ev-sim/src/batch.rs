//! Batch experiments: independent replicas of one configuration.
//!
//! Replica `i` is seeded with [`SimRng::replica`]`(config.seed, i)`, so a
//! batch is fully determined by its configuration and replica count.  With the
//! `parallel` feature replicas run on Rayon's thread pool; results are always
//! returned in ascending replica index, so the summary is identical either way.

use ev_core::{EvacConfig, Pos, SimRng};
use tracing::info;

use crate::{AutomatonBuilder, NoopObserver, SimError, SimResult};

/// What to run.
#[derive(Clone, Debug)]
pub struct BatchSpec {
    /// Shared configuration.  `config.seed` is the batch's base seed.
    pub config:   EvacConfig,
    pub replicas: u64,
}

impl BatchSpec {
    pub fn new(config: EvacConfig, replicas: u64) -> Self {
        Self { config, replicas }
    }
}

/// One replica's outcome.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicaResult {
    pub index:            u64,
    /// Generations until terminal, or until the cap.
    pub generations:      u64,
    pub terminal:         bool,
    pub people_at_seed:   u64,
    /// Escapes per exit, construction order.
    pub escapes_per_exit: Vec<u64>,
}

/// Per-replica results plus batch means.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    pub exits:                  Vec<Pos>,
    pub replicas:               Vec<ReplicaResult>,
    pub mean_generations:       f64,
    pub mean_people_at_seed:    f64,
    pub total_escapes_per_exit: Vec<u64>,
    pub mean_escapes_per_exit:  Vec<f64>,
}

impl BatchSummary {
    fn from_replicas(exits: Vec<Pos>, replicas: Vec<ReplicaResult>) -> Self {
        let n = replicas.len().max(1) as f64;
        let mut totals = vec![0u64; exits.len()];
        for r in &replicas {
            for (t, e) in totals.iter_mut().zip(&r.escapes_per_exit) {
                *t += e;
            }
        }
        Self {
            mean_generations:       replicas.iter().map(|r| r.generations as f64).sum::<f64>() / n,
            mean_people_at_seed:    replicas.iter().map(|r| r.people_at_seed as f64).sum::<f64>() / n,
            mean_escapes_per_exit:  totals.iter().map(|&t| t as f64 / n).collect(),
            total_escapes_per_exit: totals,
            exits,
            replicas,
        }
    }

    /// Replicas that stopped at the generation cap with occupants left.
    pub fn capped(&self) -> usize {
        self.replicas.iter().filter(|r| !r.terminal).count()
    }
}

/// Build and run replica `index` of `config` to completion.
pub fn run_replica(config: &EvacConfig, index: u64) -> SimResult<ReplicaResult> {
    let mut automaton = AutomatonBuilder::new(config.clone())
        .rng(SimRng::replica(config.seed, index))
        .build()?;
    let people_at_seed = automaton.people_count_at_seed();
    let outcome = automaton.run(&mut NoopObserver)?;
    Ok(ReplicaResult {
        index,
        generations: outcome.generations.0,
        terminal: outcome.terminal,
        people_at_seed,
        escapes_per_exit: automaton.escape_log().totals(),
    })
}

/// Run every replica of `spec` and summarise.
pub fn run_batch(spec: &BatchSpec) -> SimResult<BatchSummary> {
    if spec.replicas == 0 {
        return Err(SimError::Config("a batch needs at least one replica".into()));
    }
    spec.config.validate()?;

    let replicas = run_replicas(&spec.config, spec.replicas)?;
    let summary = BatchSummary::from_replicas(spec.config.exits.clone(), replicas);

    info!(
        replicas = spec.replicas,
        mean_generations = summary.mean_generations,
        capped = summary.capped(),
        "batch complete"
    );
    Ok(summary)
}

#[cfg(not(feature = "parallel"))]
fn run_replicas(config: &EvacConfig, n: u64) -> SimResult<Vec<ReplicaResult>> {
    (0..n).map(|i| run_replica(config, i)).collect()
}

#[cfg(feature = "parallel")]
fn run_replicas(config: &EvacConfig, n: u64) -> SimResult<Vec<ReplicaResult>> {
    use rayon::prelude::*;

    // usize ranges are indexed, so collect keeps ascending replica order.
    (0..n as usize)
        .into_par_iter()
        .map(|i| run_replica(config, i as u64))
        .collect()
}
