//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick stands for a
//! fixed number of simulated minutes, held in `SimClock`:
//!
//!   elapsed_minutes = tick * interval_minutes
//!
//! All arithmetic is integral.  Human-readable labels are built by factoring
//! out whole days first and then rendering the remainder as `HH:MM`.

use std::fmt;

pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Simulated minutes elapsed at the start of this tick.
    #[inline]
    pub fn minutes(self, interval_minutes: u32) -> u64 {
        self.0 * interval_minutes as u64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// Render a number of minutes as zero-padded `HH:MM`.
///
/// Hours are not wrapped at 24; callers that want a time-of-day go through
/// [`DayTime`] first.
pub fn format_time(total_minutes: u64) -> String {
    let hours = total_minutes / MINUTES_PER_HOUR;
    let minutes = total_minutes % MINUTES_PER_HOUR;
    format!("{hours:02}:{minutes:02}")
}

/// Render the simulated time at `tick` as `day D - HH:MM`.
pub fn format_days_time(tick: Tick, interval_minutes: u32) -> String {
    DayTime::at(tick, interval_minutes).to_string()
}

// ── DayTime ───────────────────────────────────────────────────────────────────

/// Elapsed simulated time split into whole days and minutes into the day.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DayTime {
    pub days: u64,
    pub minutes_of_day: u64,
}

impl DayTime {
    pub fn from_minutes(total_minutes: u64) -> Self {
        Self {
            days:           total_minutes / MINUTES_PER_DAY,
            minutes_of_day: total_minutes % MINUTES_PER_DAY,
        }
    }

    #[inline]
    pub fn at(tick: Tick, interval_minutes: u32) -> Self {
        Self::from_minutes(tick.minutes(interval_minutes))
    }

    /// `(hours, minutes)` of the time of day.
    pub fn hm(&self) -> (u64, u64) {
        (self.minutes_of_day / MINUTES_PER_HOUR, self.minutes_of_day % MINUTES_PER_HOUR)
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} - {}", self.days, format_time(self.minutes_of_day))
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and maps it to simulated minutes.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated minutes per tick.
    pub interval_minutes: u32,
    /// The current tick: advanced by `SimClock::advance()` after each transition.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(interval_minutes: u32) -> Self {
        Self { interval_minutes, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    #[inline]
    pub fn elapsed_minutes(&self) -> u64 {
        self.current_tick.minutes(self.interval_minutes)
    }

    #[inline]
    pub fn day_time(&self) -> DayTime {
        DayTime::at(self.current_tick, self.interval_minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.day_time())
    }
}
