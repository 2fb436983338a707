//! Unit tests for gb-machine.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use gb_core::{MachineConfig, SimRng, StateName, Tick};
use gb_state::{FixedState, State, StateError, StateResult, TerminalState, TickContext};

use crate::{MachineBuilder, MachineError, MachineObserver, Pacer, StateMachine};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal payload: counts the transitions applied to it.
#[derive(Default)]
struct Critter {
    transitions: u64,
    hunger:      i32,
    labels:      Vec<String>,
}

impl fmt::Display for Critter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Critter(transitions: {}, hunger: {})", self.transitions, self.hunger)
    }
}

/// Bumps hunger by `delta` each tick and hands over to `next` once hunger
/// crosses `threshold`.
struct Needy {
    name:      StateName,
    delta:     i32,
    threshold: i32,
    next:      StateName,
}

impl Needy {
    fn new(name: &str, delta: i32, threshold: i32, next: &str) -> Self {
        Self { name: name.into(), delta, threshold, next: next.into() }
    }
}

impl State<Critter> for Needy {
    fn name(&self) -> &StateName {
        &self.name
    }

    fn transition(&mut self, c: &mut Critter, ctx: &TickContext<'_>) -> StateResult<StateName> {
        c.transitions += 1;
        c.hunger += self.delta;
        c.labels.push(ctx.log.label().to_owned());
        if c.hunger < 0 {
            return Err(StateError::Invariant(format!("hunger {}", c.hunger)));
        }
        Ok(if c.hunger >= self.threshold { self.next.clone() } else { self.name.clone() })
    }
}

/// Counts transitions and otherwise behaves like `FixedState`.
struct Step {
    name: StateName,
    next: StateName,
}

impl Step {
    fn new(name: &str, next: &str) -> Self {
        Self { name: name.into(), next: next.into() }
    }
}

impl State<Critter> for Step {
    fn name(&self) -> &StateName {
        &self.name
    }

    fn transition(&mut self, c: &mut Critter, ctx: &TickContext<'_>) -> StateResult<StateName> {
        c.transitions += 1;
        c.labels.push(ctx.log.label().to_owned());
        Ok(self.next.clone())
    }
}

/// Picks the next of three states at random from its own seeded stream.
struct Wander {
    name: StateName,
    rng:  SimRng,
}

impl State<Critter> for Wander {
    fn name(&self) -> &StateName {
        &self.name
    }

    fn transition(&mut self, c: &mut Critter, _ctx: &TickContext<'_>) -> StateResult<StateName> {
        c.transitions += 1;
        Ok(match self.rng.roll(10) {
            1..=5 => "WANDERING".into(),
            6..=8 => "THINKING".into(),
            _ => "AWAKE".into(),
        })
    }
}

/// Records every pause instead of sleeping.
#[derive(Clone, Default)]
struct RecordingPacer(Rc<RefCell<Vec<Duration>>>);

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) {
        self.0.borrow_mut().push(duration);
    }
}

#[derive(Default)]
struct Recorder {
    started: Option<StateName>,
    visits:  Vec<StateName>,
    ends:    Vec<(Tick, StateName)>,
    total:   Option<u64>,
}

impl MachineObserver for Recorder {
    fn on_run_start(&mut self, start: &StateName) {
        self.started = Some(start.clone());
    }
    fn on_tick_start(&mut self, _tick: Tick, state: &StateName) {
        self.visits.push(state.clone());
    }
    fn on_tick_end(&mut self, tick: Tick, _state: &StateName, next: &StateName) {
        self.ends.push((tick, next.clone()));
    }
    fn on_run_end(&mut self, total_ticks: u64) {
        self.total = Some(total_ticks);
    }
}

fn fixed(days: u32, interval: u32) -> MachineConfig {
    MachineConfig::fixed_ticks(days, interval).accelerated(true)
}

fn terminal(days: u32, interval: u32) -> MachineConfig {
    MachineConfig::until_terminal(days, interval, "END").accelerated(true)
}

fn ping_pong(config: MachineConfig) -> StateMachine<Critter> {
    MachineBuilder::new(config)
        .state(Step::new("AWAKE", "SLEEPING"))
        .state(Step::new("SLEEPING", "AWAKE"))
        .build()
        .unwrap()
}

// ── Registration ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod registration_tests {
    use super::*;

    #[test]
    fn counts_start_at_zero() {
        let m = ping_pong(fixed(1, 15));
        assert_eq!(m.count("awake"), Some(0));
        assert_eq!(m.count("sleeping"), Some(0));
        assert_eq!(m.count("eating"), None);
        assert_eq!(m.state_names().count(), 2);
    }

    #[test]
    fn duplicate_rejected_case_insensitively() {
        let mut m: StateMachine<Critter> = StateMachine::new(fixed(1, 15)).unwrap();
        m.add_state(Step::new("Awake", "AWAKE")).unwrap();
        let err = m.add_state(Step::new("AWAKE", "AWAKE")).unwrap_err();
        assert!(matches!(err, MachineError::DuplicateState(ref n) if *n == "awake"));
    }

    #[test]
    fn builder_reports_duplicates() {
        let result = MachineBuilder::<Critter>::new(fixed(1, 15))
            .state(FixedState::looping("awake"))
            .state(FixedState::looping("Awake"))
            .build();
        assert!(matches!(result, Err(MachineError::DuplicateState(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let result = StateMachine::<Critter>::new(MachineConfig::fixed_ticks(1, 0));
        assert!(matches!(result, Err(MachineError::Config(_))));
        let result = StateMachine::<Critter>::new(MachineConfig::fixed_ticks(1, 1441));
        assert!(matches!(result, Err(MachineError::Config(_))));
    }

    #[test]
    fn lookup_ignores_case() {
        let mut m = MachineBuilder::new(fixed(1, 60))
            .state(Step::new("Sleeping", "sleeping"))
            .build()
            .unwrap();
        let mut c = Critter::default();
        m.run("sLeEpInG", &mut c).unwrap();
        assert_eq!(m.count("SLEEPING"), Some(24));
    }
}

// ── Fixed-tick mode ───────────────────────────────────────────────────────────

#[cfg(test)]
mod fixed_mode_tests {
    use super::*;

    #[test]
    fn runs_exact_budget() {
        let mut m = ping_pong(fixed(1, 15));
        let mut c = Critter::default();
        let ticks = m.run("awake", &mut c).unwrap();
        assert_eq!(ticks, 96);
        assert_eq!(m.total_ticks(), 96);
        assert_eq!(m.counts().values().sum::<u64>(), 96);
        assert_eq!(m.count("awake"), Some(48));
        assert_eq!(m.count("sleeping"), Some(48));
    }

    #[test]
    fn remainder_truncated() {
        // 3 * 1440 / 7 = 617.14…
        let mut m = ping_pong(fixed(3, 7));
        let mut c = Critter::default();
        assert_eq!(m.run("awake", &mut c).unwrap(), 617);
    }

    #[test]
    fn one_transition_per_tick_on_same_payload() {
        let mut m = ping_pong(fixed(2, 30));
        let mut c = Critter::default();
        m.run("awake", &mut c).unwrap();
        assert_eq!(c.transitions, 96);
        assert_eq!(c.transitions, m.total_ticks());
    }

    #[test]
    fn ignores_states_reached() {
        // The terminal name means nothing in fixed-tick mode.
        let mut m = MachineBuilder::new(fixed(1, 60))
            .state(Step::new("AWAKE", "END"))
            .state(Step::new("END", "AWAKE"))
            .build()
            .unwrap();
        let mut c = Critter::default();
        assert_eq!(m.run("awake", &mut c).unwrap(), 24);
    }

    #[test]
    fn log_context_labels_each_tick() {
        let mut m = ping_pong(fixed(1, 15));
        let mut c = Critter::default();
        m.run("awake", &mut c).unwrap();
        assert_eq!(c.labels[0], "day 0 - 00:00");
        assert_eq!(c.labels[5], "day 0 - 01:15");
        assert_eq!(c.labels[95], "day 0 - 23:45");
        assert_eq!(m.log_context().label(), "COMPLETE");
    }

    #[test]
    fn clock_after_run() {
        let mut m = ping_pong(fixed(2, 15));
        let mut c = Critter::default();
        m.run("awake", &mut c).unwrap();
        assert_eq!(m.clock().current_tick, Tick(192));
        assert_eq!(m.clock().day_time().to_string(), "day 2 - 00:00");
    }
}

// ── Terminal-state mode ───────────────────────────────────────────────────────

#[cfg(test)]
mod terminal_mode_tests {
    use super::*;

    fn lifetime() -> StateMachine<Critter> {
        MachineBuilder::new(terminal(1, 15))
            .state(Needy::new("EATING", 10, 50, "END"))
            .state(TerminalState::new("END"))
            .build()
            .unwrap()
    }

    #[test]
    fn stops_on_terminal_and_counts_it() {
        let mut m = lifetime();
        let mut c = Critter::default();
        let ticks = m.run("eating", &mut c).unwrap();
        // 5 ticks of eating (hunger 10..=50) then the END tick.
        assert_eq!(ticks, 6);
        assert_eq!(m.count("EATING"), Some(5));
        assert_eq!(m.count("END"), Some(1));
        assert_eq!(m.counts().values().sum::<u64>(), ticks);
    }

    #[test]
    fn terminal_start_runs_one_tick() {
        let mut m = lifetime();
        let mut c = Critter::default();
        assert_eq!(m.run("end", &mut c).unwrap(), 1);
        assert_eq!(m.count("END"), Some(1));
        assert_eq!(c.transitions, 0);
    }

    #[test]
    fn terminal_state_transition_still_called() {
        let mut m = MachineBuilder::new(terminal(1, 15))
            .state(Step::new("AWAKE", "END"))
            .state(Step::new("END", "NOWHERE"))
            .build()
            .unwrap();
        let mut c = Critter::default();
        assert_eq!(m.run("awake", &mut c).unwrap(), 2);
        // The END state's own returned name is never looked up.
        assert_eq!(c.transitions, 2);
    }

    #[test]
    fn runs_past_nominal_duration() {
        // 1 day at 720 minutes is 2 ticks nominally; the payload decides.
        let mut m = MachineBuilder::new(terminal(1, 720))
            .state(Needy::new("EATING", 1, 10, "END"))
            .state(TerminalState::new("END"))
            .build()
            .unwrap();
        let mut c = Critter::default();
        assert_eq!(m.run("eating", &mut c).unwrap(), 11);
    }

    #[test]
    fn unregistered_terminal_fails_before_first_tick() {
        let mut m = MachineBuilder::new(terminal(1, 15))
            .state(Step::new("AWAKE", "END"))
            .build()
            .unwrap();
        let mut c = Critter::default();
        let err = m.run("awake", &mut c).unwrap_err();
        assert!(matches!(err, MachineError::TerminalNotRegistered(ref n) if *n == "END"));
        assert_eq!(c.transitions, 0);
        assert_eq!(m.total_ticks(), 0);
    }
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[test]
    fn unknown_next_state_stops_run() {
        let mut m = MachineBuilder::new(fixed(1, 15))
            .state(Step::new("AWAKE", "AWAKE"))
            .state(Needy::new("EATING", 10, 30, "MISSING"))
            .build()
            .unwrap();
        let mut c = Critter::default();
        let err = m.run("eating", &mut c).unwrap_err();
        match err {
            MachineError::UnknownState { name, tick } => {
                assert_eq!(name, "MISSING");
                // Hunger reaches 30 on the third tick, which names MISSING.
                assert_eq!(tick, Tick(2));
            }
            other => panic!("unexpected error: {other}"),
        }
        // The tick that named MISSING is not counted.
        assert_eq!(m.count("EATING"), Some(2));
        assert_eq!(m.total_ticks(), 2);
        assert_eq!(c.transitions, 3);
    }

    #[test]
    fn unknown_next_state_on_last_tick() {
        // A single-tick budget: nothing is looked up after the last tick.
        let mut m = MachineBuilder::new(fixed(1, 1440))
            .state(Step::new("AWAKE", "NOWHERE"))
            .build()
            .unwrap();
        let err = m.run("awake", &mut Critter::default()).unwrap_err();
        assert!(matches!(
            err,
            MachineError::UnknownState { ref name, tick: Tick(0) } if *name == "NOWHERE"
        ));
        assert_eq!(m.total_ticks(), 0);
        assert_eq!(m.count("AWAKE"), Some(0));
    }

    #[test]
    fn unknown_next_state_fails_before_pausing() {
        let pacer = RecordingPacer::default();
        let mut m = MachineBuilder::new(MachineConfig::fixed_ticks(1, 60))
            .state(Step::new("AWAKE", "NOWHERE"))
            .pacer(pacer.clone())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let err = m.run_with("awake", &mut Critter::default(), &mut rec).unwrap_err();
        assert!(matches!(err, MachineError::UnknownState { .. }));
        assert!(pacer.0.borrow().is_empty());
        assert!(rec.ends.is_empty());
        assert_eq!(rec.total, None);
    }

    #[test]
    fn unknown_start_state() {
        let mut m = ping_pong(fixed(1, 15));
        let mut c = Critter::default();
        let err = m.run("flying", &mut c).unwrap_err();
        assert!(matches!(err, MachineError::UnknownState { tick: Tick(0), .. }));
        assert_eq!(m.total_ticks(), 0);
    }

    #[test]
    fn transition_error_propagates() {
        let mut m = MachineBuilder::new(fixed(1, 15))
            .state(Needy::new("DRINKING", -4, 100, "DRINKING"))
            .build()
            .unwrap();
        let mut c = Critter { hunger: 10, ..Critter::default() };
        let err = m.run("drinking", &mut c).unwrap_err();
        match &err {
            MachineError::Transition { state, tick, source } => {
                assert_eq!(*state, "DRINKING");
                assert_eq!(*tick, Tick(2));
                assert!(matches!(source, StateError::Invariant(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        // The failing tick is not counted.
        assert_eq!(m.total_ticks(), 2);
        assert_eq!(m.counts().values().sum::<u64>(), 2);
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn second_run_rejected() {
        let mut m = ping_pong(fixed(1, 60));
        let mut c = Critter::default();
        m.run("awake", &mut c).unwrap();
        assert!(m.has_run());
        assert!(matches!(m.run("awake", &mut c), Err(MachineError::AlreadyRun)));
        assert_eq!(m.total_ticks(), 24);
    }

    #[test]
    fn failed_run_is_still_single_use() {
        let mut m = ping_pong(fixed(1, 60));
        let mut c = Critter::default();
        assert!(m.run("missing", &mut c).is_err());
        assert!(matches!(m.run("awake", &mut c), Err(MachineError::AlreadyRun)));
    }

    #[test]
    fn add_state_after_run_rejected() {
        let mut m = ping_pong(fixed(1, 60));
        let mut c = Critter::default();
        m.run("awake", &mut c).unwrap();
        let err = m.add_state(FixedState::looping("EATING")).unwrap_err();
        assert!(matches!(err, MachineError::SetupClosed));
    }

    #[test]
    fn observer_sees_every_tick() {
        let mut m = ping_pong(fixed(1, 240));
        let mut c = Critter::default();
        let mut rec = Recorder::default();
        m.run_with("sleeping", &mut c, &mut rec).unwrap();
        assert_eq!(rec.started, Some(StateName::new("SLEEPING")));
        let names: Vec<&str> = rec.visits.iter().map(StateName::as_str).collect();
        assert_eq!(names, ["SLEEPING", "AWAKE", "SLEEPING", "AWAKE", "SLEEPING", "AWAKE"]);
        assert_eq!(rec.ends.last(), Some(&(Tick(5), StateName::new("SLEEPING"))));
        assert_eq!(rec.total, Some(6));
    }
}

// ── Pacing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pacing_tests {
    use super::*;

    #[test]
    fn pauses_between_ticks_only() {
        let pacer = RecordingPacer::default();
        let mut m = MachineBuilder::new(MachineConfig::fixed_ticks(1, 60))
            .state(Step::new("AWAKE", "AWAKE"))
            .pacer(pacer.clone())
            .build()
            .unwrap();
        let mut c = Critter::default();
        m.run("awake", &mut c).unwrap();
        let pauses = pacer.0.borrow();
        assert_eq!(pauses.len(), 23);
        assert!(pauses.iter().all(|d| *d == Duration::from_secs(3600)));
    }

    #[test]
    fn no_pause_after_terminal() {
        let pacer = RecordingPacer::default();
        let mut m = MachineBuilder::new(MachineConfig::until_terminal(1, 15, "END"))
            .state(Step::new("AWAKE", "END"))
            .state(TerminalState::new("END"))
            .pacer(pacer.clone())
            .build()
            .unwrap();
        m.run("awake", &mut Critter::default()).unwrap();
        assert_eq!(pacer.0.borrow().as_slice(), [Duration::from_secs(900)]);
    }

    fn random_machine(config: MachineConfig, seed: u64, pacer: Option<RecordingPacer>) -> StateMachine<Critter> {
        let mut root = SimRng::new(seed);
        let mut builder = MachineBuilder::new(config);
        for (i, name) in ["WANDERING", "THINKING", "AWAKE"].into_iter().enumerate() {
            builder = builder.state(Wander { name: name.into(), rng: root.split(i as u64) });
        }
        if let Some(p) = pacer {
            builder = builder.pacer(p);
        }
        builder.build().unwrap()
    }

    #[test]
    fn acceleration_changes_pacing_only() {
        let mut fast = random_machine(fixed(2, 15), 42, None);
        let mut fast_rec = Recorder::default();
        fast.run_with("awake", &mut Critter::default(), &mut fast_rec).unwrap();

        let pacer = RecordingPacer::default();
        let mut paced = random_machine(MachineConfig::fixed_ticks(2, 15), 42, Some(pacer.clone()));
        let mut paced_rec = Recorder::default();
        paced.run_with("awake", &mut Critter::default(), &mut paced_rec).unwrap();

        assert_eq!(fast_rec.visits, paced_rec.visits);
        assert_eq!(fast.counts(), paced.counts());
        assert_eq!(pacer.0.borrow().len(), 191);
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use super::*;
    use crate::{Stats, format_percentage, percentage};

    #[test]
    fn percentage_of_total() {
        assert_eq!(percentage(500, 2000), Some(25.0));
        assert_eq!(percentage(0, 2000), Some(0.0));
        assert_eq!(percentage(3, 0), None);
    }

    #[test]
    fn percentage_format() {
        assert_eq!(format_percentage(25.0), "25.00%");
        assert_eq!(format_percentage(5.0), "5.00%");
        assert_eq!(format_percentage(100.0), "100.00%");
        assert_eq!(format_percentage(1.0 / 3.0 * 100.0), "33.33%");
    }

    #[test]
    fn stats_before_run_fail() {
        let m = ping_pong(fixed(1, 15));
        assert!(matches!(m.stats(), Err(MachineError::NoTicks)));
    }

    #[test]
    fn zero_total_never_divides() {
        let counts = std::collections::BTreeMap::from([(StateName::new("A"), 0u64)]);
        assert!(Stats::from_counts(&counts, 0, 15, 1).is_none());
    }

    #[test]
    fn stats_from_counts() {
        let counts = std::collections::BTreeMap::from([
            (StateName::new("SLEEPING"), 500u64),
            (StateName::new("AWAKE"), 1500u64),
        ]);
        // 2000 ticks of 15 minutes over 20 days (a truncated 21-ish day run).
        let stats = Stats::from_counts(&counts, 2000, 15, 20).unwrap();
        let sleeping = stats.get(&StateName::new("sleeping")).unwrap();
        assert_eq!(sleeping.percentage, 25.0);
        // 500 * 15 / 20 = 375 minutes.
        assert_eq!(sleeping.average_minutes_per_day, 375);
        assert_eq!(sleeping.average_time(), "06:15");
    }

    #[test]
    fn machine_stats_and_table() {
        let mut m = ping_pong(fixed(1, 15));
        m.run("awake", &mut Critter::default()).unwrap();
        let stats = m.stats().unwrap();
        assert_eq!(stats.total_ticks, 96);
        assert_eq!(stats.entries.len(), 2);
        let awake = &stats.entries[0];
        assert_eq!(awake.name, "AWAKE");
        assert_eq!(awake.percentage, 50.0);
        assert_eq!(awake.average_time(), "12:00");
        assert_eq!(awake.to_string(), "AWAKE     : 50.00% - 12:00");

        let table = stats.to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Days: 1, Interval: 15 mins, Ticks: 96");
        assert_eq!(lines[2], "SLEEPING  : 50.00% - 12:00");
    }

    #[test]
    fn unvisited_states_reported_as_zero() {
        let mut m = MachineBuilder::new(fixed(1, 60))
            .state(Step::new("AWAKE", "AWAKE"))
            .state(Step::new("EATING", "EATING"))
            .build()
            .unwrap();
        m.run("awake", &mut Critter::default()).unwrap();
        let stats = m.stats().unwrap();
        let eating = stats.get(&"eating".into()).unwrap();
        assert_eq!(eating.count, 0);
        assert_eq!(eating.percentage, 0.0);
        assert_eq!(eating.to_string(), "EATING    : 0.00% - 00:00");
    }
}
