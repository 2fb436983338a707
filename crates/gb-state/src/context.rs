//! Per-call context handed to every [`State::transition`][crate::State::transition].

use gb_core::{DayTime, LogContext, Tick};

/// What a state knows about the tick it is handling.
///
/// The payload is passed separately and mutably; this struct is read-only.
/// `interval_minutes` lets a payload keep its own age tracker without the
/// machine ever touching payload fields.
pub struct TickContext<'a> {
    /// The tick being executed (zero-based).
    pub tick: Tick,

    /// How many simulated minutes this tick represents.
    pub interval_minutes: u32,

    /// Labelled logger; already set to this tick's time.
    pub log: &'a LogContext,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(tick: Tick, interval_minutes: u32, log: &'a LogContext) -> Self {
        Self { tick, interval_minutes, log }
    }

    /// Simulated time at the start of this tick.
    #[inline]
    pub fn day_time(&self) -> DayTime {
        DayTime::at(self.tick, self.interval_minutes)
    }
}
