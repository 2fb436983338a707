//! The `StateMachine` struct and its tick loop.

use std::collections::BTreeMap;
use std::fmt;

use gb_core::log::COMPLETE;
use gb_core::{LogContext, MachineConfig, SimClock, StateName};
use gb_state::{State, TickContext};

use crate::pacer::{NoPause, Pacer, RealTimePacer};
use crate::{MachineError, MachineObserver, MachineResult, NoopObserver, StateRegistry, Stats};

// ── StateMachine ──────────────────────────────────────────────────────────────

/// Drives one simulated lifetime of a payload through registered states.
///
/// Each tick:
///
/// 1. **Label**: the log context is set to the tick's `day D - HH:MM` and the
///    payload is logged.
/// 2. **Lookup**: the current state is resolved by name.  An unregistered
///    name aborts the run before anything is counted for that tick.
/// 3. **Transition**: the state mutates the payload in place and returns the
///    next state's name.  Exactly one transition happens per tick.  A next
///    name that is not registered aborts the run on this tick, uncounted.
/// 4. **Count**: the state's visit count and the clock advance together, so
///    the counts always sum to the ticks completed, even after a failure.
/// 5. **Pace**: unless this was the last tick, the pacer blocks for one
///    interval (a no-op in accelerated mode).
///
/// The run ends when the tick budget is spent or, in terminal-state mode,
/// after the tick on which the terminal state was current.
///
/// A machine is single-use: counts belong to one lifetime, so `run` may only
/// be called once, and states may only be added before it.
///
/// Create with [`StateMachine::new`] or [`MachineBuilder`][crate::MachineBuilder].
pub struct StateMachine<P: ?Sized> {
    config: MachineConfig,
    clock: SimClock,
    registry: StateRegistry<P>,
    log: LogContext,
    pacer: Box<dyn Pacer>,
    ran: bool,
}

impl<P: ?Sized> StateMachine<P> {
    /// Validate `config` and create an empty machine.
    ///
    /// The pacer follows `config.accelerated`: real sleeping unless set.
    pub fn new(config: MachineConfig) -> MachineResult<Self> {
        let pacer: Box<dyn Pacer> = if config.accelerated {
            Box::new(NoPause)
        } else {
            Box::new(RealTimePacer)
        };
        Self::with_pacer(config, pacer)
    }

    /// Validate `config` and create an empty machine paced by `pacer`.
    pub fn with_pacer(config: MachineConfig, pacer: Box<dyn Pacer>) -> MachineResult<Self> {
        config.validate()?;
        Ok(Self {
            clock: config.make_clock(),
            config,
            registry: StateRegistry::new(),
            log: LogContext::new(),
            pacer,
            ran: false,
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Register a state.  Fails on duplicate names and once the machine ran.
    pub fn add_state<S>(&mut self, state: S) -> MachineResult<()>
    where
        S: State<P> + 'static,
    {
        self.add_boxed(Box::new(state))
    }

    pub fn add_boxed(&mut self, state: Box<dyn State<P>>) -> MachineResult<()> {
        if self.ran {
            return Err(MachineError::SetupClosed);
        }
        self.registry.insert(state)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn log_context(&self) -> &LogContext {
        &self.log
    }

    /// Ticks executed so far.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.clock.current_tick.0
    }

    pub fn counts(&self) -> &BTreeMap<StateName, u64> {
        self.registry.counts()
    }

    /// Visit count for `name` (any case), `None` if not registered.
    pub fn count(&self, name: impl Into<StateName>) -> Option<u64> {
        self.registry.count(&name.into())
    }

    pub fn state_names(&self) -> impl Iterator<Item = &StateName> {
        self.registry.names()
    }

    pub fn has_run(&self) -> bool {
        self.ran
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    /// Per-state percentages and average time per day.
    ///
    /// Fails with [`MachineError::NoTicks`] if nothing was executed.
    pub fn stats(&self) -> MachineResult<Stats> {
        Stats::from_counts(
            self.registry.counts(),
            self.total_ticks(),
            self.config.interval_minutes,
            self.config.duration_days,
        )
        .ok_or(MachineError::NoTicks)
    }
}

impl<P: fmt::Display + ?Sized> StateMachine<P> {
    // ── Execution ─────────────────────────────────────────────────────────

    /// Run one lifetime starting in `start`.  Returns the ticks executed.
    ///
    /// A transition that names an unregistered state fails the run with
    /// [`MachineError::UnknownState`] on that same tick, before any pause.
    /// That tick is not counted, so counts cover only the completed ticks.
    pub fn run(&mut self, start: impl Into<StateName>, payload: &mut P) -> MachineResult<u64> {
        self.run_with(start, payload, &mut NoopObserver)
    }

    /// Like [`run`][Self::run], reporting progress to `observer`.
    pub fn run_with<O>(
        &mut self,
        start:    impl Into<StateName>,
        payload:  &mut P,
        observer: &mut O,
    ) -> MachineResult<u64>
    where
        O: MachineObserver + ?Sized,
    {
        if self.ran {
            return Err(MachineError::AlreadyRun);
        }
        if let Some(terminal) = self.config.terminal() {
            if !self.registry.contains(terminal) {
                return Err(MachineError::TerminalNotRegistered(terminal.clone()));
            }
        }
        // Single-use from here on, whether or not the run succeeds.
        self.ran = true;

        let budget = self.config.tick_budget();
        let mut current = start.into();

        match budget {
            Some(ticks) => self.log.info(format_args!(
                "Days: {}, Interval: {} mins, Ticks: {}",
                self.config.duration_days, self.config.interval_minutes, ticks
            )),
            None => self.log.info(format_args!(
                "Interval: {} mins, running until {}",
                self.config.interval_minutes,
                self.config.terminal().map(StateName::as_str).unwrap_or_default()
            )),
        }
        observer.on_run_start(&current);

        loop {
            let tick = self.clock.current_tick;
            if budget.is_some_and(|b| tick.0 >= b) {
                break;
            }

            self.log.set_context(self.clock.day_time().to_string());
            self.log.info(&*payload);
            observer.on_tick_start(tick, &current);

            // Explicit field borrows so the borrow checker sees disjoint access.
            let next = {
                let state = self.registry.get_mut(&current, tick)?;
                let ctx = TickContext::new(tick, self.config.interval_minutes, &self.log);
                state.transition(payload, &ctx).map_err(|source| MachineError::Transition {
                    state: current.clone(),
                    tick,
                    source,
                })?
            };

            // The terminal state's answer is ignored; every other answer must
            // name a registered state before the tick counts.
            let at_terminal = self.config.terminal().is_some_and(|t| *t == current);
            if !at_terminal && !self.registry.contains(&next) {
                return Err(MachineError::UnknownState { name: next, tick });
            }

            self.registry.record_visit(&current);
            self.clock.advance();
            debug_assert_eq!(self.registry.total_visits(), self.total_ticks());
            observer.on_tick_end(tick, &current, &next);

            if at_terminal {
                break;
            }
            if current != next {
                self.log.debug(format_args!("{current} -> {next}"));
            }

            let more = budget.is_none_or(|b| self.clock.current_tick.0 < b);
            if more {
                self.pacer.pause(self.config.pause_duration());
            }
            current = next;
        }

        let total = self.total_ticks();
        self.log.set_context(COMPLETE);
        self.log.info(format_args!("{total} ticks, finished in {current}"));
        observer.on_run_end(total);
        Ok(total)
    }
}
