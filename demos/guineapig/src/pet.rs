//! The guinea pig payload and the capability trait its states rely on.

use std::fmt;

use gb_core::{DayTime, MINUTES_PER_DAY, MachineConfig, StateName};
use gb_state::{StateError, StateResult, TickContext};

use crate::states::{EATING, SLEEPING};

/// Attributes outside this range mean the policy has gone wrong.
const ATTRIBUTE_MAX: i32 = 130;

/// Per-tick attribute deltas applied by a state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Changes {
    pub tired:  i32,
    pub hunger: i32,
    pub thirst: i32,
}

impl Changes {
    pub const fn new(tired: i32, hunger: i32, thirst: i32) -> Self {
        Self { tired, hunger, thirst }
    }
}

/// Everything a guinea pig state may read or change on its payload.
pub trait Pet: fmt::Display {
    /// Enter `state` for one tick: apply `changes`, then age by one tick.
    /// Fails if an attribute leaves its valid range.
    fn apply(&mut self, state: &StateName, changes: Changes, ctx: &TickContext<'_>) -> StateResult<()>;

    fn is_tired(&self) -> bool;
    fn is_hungry(&self) -> bool;
    fn is_thirsty(&self) -> bool;

    /// The pet has reached the end of its lifespan.
    fn has_died(&self) -> bool;
}

// ── AgeTracker ────────────────────────────────────────────────────────────────

/// Counts ticks of life against a lifespan.
///
/// The lifespan is the whole ticks that fit in `lifespan_days` (truncating),
/// the same budget a fixed-tick run of that length would get.  In
/// terminal-state runs this is the authoritative end-of-run signal.
#[derive(Clone, Debug)]
pub struct AgeTracker {
    lifespan_days:    u32,
    interval_minutes: u32,
    max_age:          u64,
    age_ticks:        u64,
}

impl AgeTracker {
    pub fn new(lifespan_days: u32, interval_minutes: u32) -> Self {
        let max_age = (lifespan_days as u64 * MINUTES_PER_DAY)
            .checked_div(interval_minutes as u64)
            .unwrap_or(0);
        Self { lifespan_days, interval_minutes, max_age, age_ticks: 0 }
    }

    /// A tracker for the lifetime described by `config`.
    pub fn for_run(config: &MachineConfig) -> Self {
        Self::new(config.duration_days, config.interval_minutes)
    }

    /// Age by one tick.
    pub fn increase(&mut self) {
        self.age_ticks += 1;
    }

    pub fn has_died(&self) -> bool {
        self.age_ticks >= self.max_age
    }

    pub fn lifespan_days(&self) -> u32 {
        self.lifespan_days
    }

    pub fn age_minutes(&self) -> u64 {
        self.age_ticks * self.interval_minutes as u64
    }
}

impl fmt::Display for AgeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DayTime::from_minutes(self.age_minutes()))
    }
}

// ── GuineaPig ─────────────────────────────────────────────────────────────────

pub struct GuineaPig {
    name:   String,
    age:    AgeTracker,
    state:  StateName,
    tired:  i32,
    hunger: i32,
    thirst: i32,
}

impl GuineaPig {
    pub fn new(
        name:   impl Into<String>,
        age:    AgeTracker,
        start:  impl Into<StateName>,
        tired:  i32,
        hunger: i32,
        thirst: i32,
    ) -> Self {
        Self { name: name.into(), age, state: start.into(), tired, hunger, thirst }
    }

    fn rogue(&self) -> bool {
        [self.tired, self.hunger, self.thirst]
            .into_iter()
            .any(|v| !(0..=ATTRIBUTE_MAX).contains(&v))
    }
}

impl Pet for GuineaPig {
    fn apply(&mut self, state: &StateName, changes: Changes, ctx: &TickContext<'_>) -> StateResult<()> {
        self.tired += changes.tired;
        self.hunger += changes.hunger;
        self.thirst += changes.thirst;
        if self.rogue() {
            ctx.log.error(format_args!("Rogue pig: {}", self));
            return Err(StateError::Invariant(format!("{} out of bounds in {state}", self.name)));
        }
        if self.state != *state {
            self.state = state.clone();
            ctx.log.info(format_args!("{} is now {}", self.name, self.state));
        }
        self.age.increase();
        Ok(())
    }

    /// Won't sleep while hungry or thirsty; keeps sleeping down to 30.
    fn is_tired(&self) -> bool {
        if self.is_hungry() || self.is_thirsty() {
            return false;
        }
        if self.state == SLEEPING {
            self.tired > 30
        } else {
            self.tired > 80
        }
    }

    /// Won't eat while thirsty; keeps eating down to 30.
    fn is_hungry(&self) -> bool {
        if self.is_thirsty() {
            return false;
        }
        if self.state == EATING {
            self.hunger > 30
        } else {
            self.hunger > 80
        }
    }

    fn is_thirsty(&self) -> bool {
        self.thirst > 80
    }

    fn has_died(&self) -> bool {
        self.age.has_died()
    }
}

impl fmt::Display for GuineaPig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GuineaPig:(Name: {}, Lifespan: {} days, Current Age: {} mins, State: {}, Tired: {}, Hunger: {}, Thirst: {})",
            self.name,
            self.age.lifespan_days(),
            self.age.age_minutes(),
            self.state,
            self.tired,
            self.hunger,
            self.thirst,
        )
    }
}
