//! `gb-output`: output writers for finished and in-flight runs.
//!
//! | File          | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | `visits.csv`  | one row per tick: time label, state, next state       |
//! | `stats.csv`   | one row per state: count, percentage, average per day |
//!
//! Writers implement [`OutputWriter`]; [`TraceObserver`] plugs a writer into
//! `StateMachine::run_with`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gb_output::{CsvWriter, TraceObserver, write_stats};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer, machine.config());
//! machine.run_with("sleeping", &mut pet, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! let mut writer = obs.into_writer();
//! write_stats(&mut writer, &machine.stats()?)?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{StatsRow, VisitRow};
pub use writer::{OutputWriter, write_stats};
