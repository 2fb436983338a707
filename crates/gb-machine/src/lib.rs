//! `gb-machine`: tick loop and statistics for the guineabot state machine.
//!
//! # Tick loop
//!
//! ```text
//! current = start
//! loop:
//!   stop if the tick budget is spent               (fixed-tick mode)
//!   label log context with "day D - HH:MM"
//!   state = registry[current]                      (UnknownState if missing)
//!   next  = state.transition(&mut payload, ctx)    (errors abort the run)
//!   counts[current] += 1; clock.advance()
//!   stop if current is the terminal state          (terminal-state mode)
//!   pace one interval unless accelerated
//!   current = next
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gb_core::MachineConfig;
//! use gb_machine::MachineBuilder;
//! use gb_state::{FixedState, TerminalState};
//!
//! let config = MachineConfig::until_terminal(9, 15, "END").accelerated(true);
//! let mut machine = MachineBuilder::new(config)
//!     .state(MyState::sleeping())
//!     .state(TerminalState::new("END"))
//!     .build()?;
//! machine.run("sleeping", &mut pet)?;
//! print!("{}", machine.stats()?);
//! ```

pub mod builder;
pub mod error;
pub mod machine;
pub mod observer;
pub mod pacer;
pub mod registry;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::MachineBuilder;
pub use error::{MachineError, MachineResult};
pub use machine::StateMachine;
pub use observer::{MachineObserver, NoopObserver};
pub use pacer::{NoPause, Pacer, RealTimePacer};
pub use registry::StateRegistry;
pub use stats::{StateStats, Stats, format_percentage, percentage};
