//! `TraceObserver<W>`: bridges `MachineObserver` to an `OutputWriter`.

use gb_core::{DayTime, MachineConfig, StateName, Tick};
use gb_machine::MachineObserver;

use crate::row::VisitRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`MachineObserver`] that writes one visit row per tick to any
/// [`OutputWriter`].
///
/// Observer callbacks have no return value, so writer errors are stored and
/// retrieved with [`take_error`][Self::take_error] after the run.
pub struct TraceObserver<W: OutputWriter> {
    writer:           W,
    interval_minutes: u32,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W, config: &MachineConfig) -> Self {
        Self {
            writer,
            interval_minutes: config.interval_minutes,
            last_error:       None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> MachineObserver for TraceObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, state: &StateName, next: &StateName) {
        let row = VisitRow {
            tick:       tick.0,
            day_time:   DayTime::at(tick, self.interval_minutes).to_string(),
            state:      state.to_string(),
            next_state: next.to_string(),
        };
        let result = self.writer.write_visit(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _total_ticks: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
