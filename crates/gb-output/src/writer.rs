//! The `OutputWriter` trait implemented by all backend writers.

use gb_machine::Stats;

use crate::{OutputResult, StatsRow, VisitRow};

pub trait OutputWriter {
    /// Write one tick's visit.
    fn write_visit(&mut self, row: &VisitRow) -> OutputResult<()>;

    /// Write the end-of-run table.
    ///
    /// A run has one table: file-backed writers fail with
    /// [`OutputError::StatsAlreadyWritten`](crate::OutputError::StatsAlreadyWritten) on a second call.
    fn write_stats(&mut self, rows: &[StatsRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write `stats` through `writer` and flush.
pub fn write_stats<W: OutputWriter + ?Sized>(writer: &mut W, stats: &Stats) -> OutputResult<()> {
    let rows: Vec<StatsRow> = stats.entries.iter().map(StatsRow::from).collect();
    writer.write_stats(&rows)?;
    writer.finish()
}
