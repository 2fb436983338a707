//! Machine observer trait for tracing runs and collecting output.

use gb_core::{StateName, Tick};

/// Callbacks invoked by [`StateMachine::run_with`][crate::StateMachine::run_with]
/// at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: visit recorder
///
/// ```rust,ignore
/// struct Visits(Vec<StateName>);
///
/// impl MachineObserver for Visits {
///     fn on_tick_start(&mut self, _tick: Tick, state: &StateName) {
///         self.0.push(state.clone());
///     }
/// }
/// ```
pub trait MachineObserver {
    /// Called once before the first tick.
    fn on_run_start(&mut self, _start: &StateName) {}

    /// Called at the start of each tick, before the state is looked up.
    fn on_tick_start(&mut self, _tick: Tick, _state: &StateName) {}

    /// Called after `state`'s transition returned `next`.
    fn on_tick_end(&mut self, _tick: Tick, _state: &StateName, _next: &StateName) {}

    /// Called once after the final tick completes successfully.
    fn on_run_end(&mut self, _total_ticks: u64) {}
}

/// A [`MachineObserver`] that does nothing.
pub struct NoopObserver;

impl MachineObserver for NoopObserver {}
