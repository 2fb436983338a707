//! Run configuration for a state machine.
//!
//! Exactly one end-of-run signal is authoritative per machine:
//!
//! - [`EndCondition::TickBudget`]: the machine's tick counter.  The run lasts
//!   `duration_days * 1440 / interval_minutes` ticks (integer division, any
//!   remainder is dropped) whatever states are visited.
//! - [`EndCondition::TerminalState`]: the payload.  The run ends on the tick
//!   whose current state is the terminal sentinel; the states are expected to
//!   steer toward it (e.g. once the payload's own age tracker says so).
//!   `duration_days` is then only the nominal lifespan used for per-day
//!   averages in the report.

use std::time::Duration;

use crate::{CoreError, CoreResult, MINUTES_PER_DAY, SimClock, StateName};

/// How a run decides it is finished.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndCondition {
    /// Fixed number of ticks derived from the duration.
    TickBudget,
    /// Run until the named state becomes current.
    TerminalState(StateName),
}

/// Timing parameters supplied at construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MachineConfig {
    /// Simulated minutes per tick.  Must be positive.
    pub interval_minutes: u32,

    /// Simulated lifespan in days.  Must be positive.
    pub duration_days: u32,

    pub end: EndCondition,

    /// Skip the real-time pause between ticks.  Changes pacing only, never
    /// the sequence of visited states.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accelerated: bool,
}

impl MachineConfig {
    pub fn fixed_ticks(duration_days: u32, interval_minutes: u32) -> Self {
        Self {
            interval_minutes,
            duration_days,
            end: EndCondition::TickBudget,
            accelerated: false,
        }
    }

    pub fn until_terminal(
        duration_days:    u32,
        interval_minutes: u32,
        terminal:         impl Into<StateName>,
    ) -> Self {
        Self {
            interval_minutes,
            duration_days,
            end: EndCondition::TerminalState(terminal.into()),
            accelerated: false,
        }
    }

    pub fn accelerated(mut self, accelerated: bool) -> Self {
        self.accelerated = accelerated;
        self
    }

    /// Reject configurations that cannot produce meaningful statistics.
    pub fn validate(&self) -> CoreResult<()> {
        if self.interval_minutes == 0 {
            return Err(CoreError::Config("interval must be at least one minute".into()));
        }
        if self.duration_days == 0 {
            return Err(CoreError::Config("duration must be at least one day".into()));
        }
        match &self.end {
            EndCondition::TickBudget => {
                if self.ticks_for_duration() == 0 {
                    return Err(CoreError::ZeroTicks {
                        days:     self.duration_days,
                        interval: self.interval_minutes,
                    });
                }
            }
            EndCondition::TerminalState(name) => {
                if name.is_empty() {
                    return Err(CoreError::Config("terminal state name is empty".into()));
                }
            }
        }
        Ok(())
    }

    /// Ticks spanned by the configured duration (truncating).
    #[inline]
    pub fn ticks_for_duration(&self) -> u64 {
        self.duration_days as u64 * MINUTES_PER_DAY / self.interval_minutes.max(1) as u64
    }

    /// The tick budget in fixed-tick mode, `None` in terminal-state mode.
    pub fn tick_budget(&self) -> Option<u64> {
        match self.end {
            EndCondition::TickBudget => Some(self.ticks_for_duration()),
            EndCondition::TerminalState(_) => None,
        }
    }

    pub fn terminal(&self) -> Option<&StateName> {
        match &self.end {
            EndCondition::TickBudget => None,
            EndCondition::TerminalState(name) => Some(name),
        }
    }

    /// Real time one tick represents: `interval_minutes * 60` seconds.
    #[inline]
    pub fn pause_duration(&self) -> Duration {
        Duration::from_secs(self.interval_minutes as u64 * 60)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.interval_minutes)
    }
}
