//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `generation_summaries.csv`
//! - `escapes.csv`
//! - `occupant_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EscapeRow, GenerationSummaryRow, OccupantSnapshotRow, OutputResult};

pub const SUMMARY_FILE:  &str = "generation_summaries.csv";
pub const ESCAPE_FILE:   &str = "escapes.csv";
pub const SNAPSHOT_FILE: &str = "occupant_snapshots.csv";

/// Writes run output to three CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    escapes:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record([
            "generation", "empty", "person", "exit", "moved", "escaped", "stayed",
        ])?;

        let mut escapes = Writer::from_path(dir.join(ESCAPE_FILE))?;
        escapes.write_record(["exit_row", "exit_col", "generation", "escaped"])?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record(["generation", "row", "col"])?;

        Ok(Self {
            summaries,
            escapes,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[OccupantSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.generation.to_string(),
                row.row.to_string(),
                row.col.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_generation_summary(&mut self, row: &GenerationSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.generation.to_string(),
            row.empty.to_string(),
            row.person.to_string(),
            row.exit.to_string(),
            row.moved.to_string(),
            row.escaped.to_string(),
            row.stayed.to_string(),
        ])?;
        Ok(())
    }

    fn write_escapes(&mut self, rows: &[EscapeRow]) -> OutputResult<()> {
        for row in rows {
            self.escapes.write_record(&[
                row.exit_row.to_string(),
                row.exit_col.to_string(),
                row.generation.to_string(),
                row.escaped.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.escapes.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
