//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `visits.csv`
//! - `stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, StatsRow, VisitRow};

pub struct CsvWriter {
    visits: Writer<File>,
    stats:  Writer<File>,
    stats_written: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut visits = Writer::from_path(dir.join("visits.csv"))?;
        visits.write_record(["tick", "day_time", "state", "next_state"])?;

        let mut stats = Writer::from_path(dir.join("stats.csv"))?;
        stats.write_record(["state", "count", "percentage", "average_per_day"])?;

        Ok(Self { visits, stats, stats_written: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_visit(&mut self, row: &VisitRow) -> OutputResult<()> {
        self.visits.write_record(&[
            row.tick.to_string(),
            row.day_time.clone(),
            row.state.clone(),
            row.next_state.clone(),
        ])?;
        Ok(())
    }

    fn write_stats(&mut self, rows: &[StatsRow]) -> OutputResult<()> {
        if self.stats_written {
            return Err(OutputError::StatsAlreadyWritten);
        }
        self.stats_written = true;
        for row in rows {
            self.stats.write_record(&[
                row.state.clone(),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
                row.average_per_day.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.visits.flush()?;
        self.stats.flush()?;
        Ok(())
    }
}
