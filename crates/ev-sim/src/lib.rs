//! `ev-sim`: the evacuation automaton with its transition engine, statistics,
//! run loop and batch runner.
//!
//! # Two-pass generation
//!
//! ```text
//! for each generation while occupants remain:
//!   ① Crowd    recount occupants inside every exit's capture radius.
//!   ② Target   fresh next grid: all Empty, exits stamped.
//!   ③ Intent   row-major over occupants: choose an exit by safety, reserve
//!                the closest free neighbor strictly closer to it, or stay.
//!   ④ Commit   in reservation order:
//!                  Empty target → Person in the next grid
//!                  Exit target  → escape logged for this generation
//!   ⑤ Check    people(next) + escapes == people(current)
//!   ⑥ Swap     replace the grid, advance the counter, record the histogram.
//! ```
//!
//! # Crate layout
//!
//! | Module           | Contents                                                |
//! |------------------|---------------------------------------------------------|
//! | [`automaton`]    | `EscapeAutomaton`, `StepReport`, `RunOutcome`           |
//! | [`builder`]      | `AutomatonBuilder`                                      |
//! | [`transition`]   | `Reservations`, `IntentPlan`, `plan_intents`, `commit`  |
//! | [`stats`]        | `StateHistory`, `EscapeLog`                             |
//! | [`observer`]     | `EvacObserver`, `NoopObserver`                          |
//! | [`batch`]        | `run_batch`, `BatchSummary`                             |
//! | [`error`]        | `SimError`, `SimResult<T>`                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs batch replicas on Rayon's thread pool.            |
//! | `fx-hash`  | FxHash for the exit-coordinate lookup table.           |
//! | `serde`    | `Serialize`/`Deserialize` on reports and summaries.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::{EvacConfig, Pos};
//! use ev_sim::{AutomatonBuilder, NoopObserver};
//!
//! let config = EvacConfig::new(50, 50, vec![Pos::new(5, 5), Pos::new(49, 49)]);
//! let mut automaton = AutomatonBuilder::new(config).build()?;
//! let outcome = automaton.run(&mut NoopObserver)?;
//! println!("evacuated in {} generations", outcome.generations);
//! ```

pub mod automaton;
pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod stats;
pub mod transition;


pub use automaton::{EscapeAutomaton, RunOutcome, StepReport};
pub use batch::{BatchSpec, BatchSummary, ReplicaResult, run_batch, run_replica};
pub use builder::AutomatonBuilder;
pub use error::{SimError, SimResult};
pub use observer::{EvacObserver, NoopObserver};
pub use stats::{EscapeLog, HistoryAggregates, StateCounts, StateHistory};
pub use transition::{IntentPlan, Move, Reservations, TransitionCounts};
