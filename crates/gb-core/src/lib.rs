//! `gb-core`: foundational types for the guineabot state machine.
//!
//! This crate is a dependency of every other `gb-*` crate.  It has no `gb-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`name`]   | `StateName`: case-normalized state identifier              |
//! | [`time`]   | `Tick`, `SimClock`, `DayTime`, HH:MM formatting helpers     |
//! | [`config`] | `MachineConfig`, `EndCondition`                             |
//! | [`rng`]    | `SimRng`: seeded RNG for policy plug-ins                   |
//! | [`log`]    | `LogContext`, `init_logging`                                |
//! | [`error`]  | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to names and config types.  |

pub mod config;
pub mod error;
pub mod log;
pub mod name;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EndCondition, MachineConfig};
pub use error::{CoreError, CoreResult};
pub use log::{LogContext, init_logging};
pub use name::StateName;
pub use rng::SimRng;
pub use time::{DayTime, MINUTES_PER_DAY, MINUTES_PER_HOUR, SimClock, Tick, format_days_time, format_time};
