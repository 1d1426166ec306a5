//! `ev-output`: run output writers for rust_evac.
//!
//! | Backend | Files created                                                        |
//! |---------|----------------------------------------------------------------------|
//! | CSV     | `generation_summaries.csv`, `escapes.csv`, `occupant_snapshots.csv`  |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`EvacOutputObserver`], which implements `ev_sim::EvacObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvWriter, EvacOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = EvacOutputObserver::new(writer);
//! automaton.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{EvacOutputObserver, escape_rows};
pub use row::{EscapeRow, GenerationSummaryRow, OccupantSnapshotRow};
pub use writer::OutputWriter;
