//! States that carry no policy of their own.

use gb_core::StateName;

use crate::{State, StateResult, TickContext};

/// A sentinel state for terminal-state runs.
///
/// Leaves the payload untouched and names itself as the next state.  The
/// machine stops on the tick it becomes current, so the returned name is
/// never looked up.
pub struct TerminalState {
    name: StateName,
}

impl TerminalState {
    pub fn new(name: impl Into<StateName>) -> Self {
        Self { name: name.into() }
    }
}

impl<P: ?Sized> State<P> for TerminalState {
    fn name(&self) -> &StateName {
        &self.name
    }

    fn transition(&mut self, _payload: &mut P, _ctx: &TickContext<'_>) -> StateResult<StateName> {
        Ok(self.name.clone())
    }
}

/// A state that always moves to the same next state.
///
/// Useful for scripted cycles and as a placeholder while wiring a machine.
pub struct FixedState {
    name: StateName,
    next: StateName,
}

impl FixedState {
    pub fn new(name: impl Into<StateName>, next: impl Into<StateName>) -> Self {
        Self { name: name.into(), next: next.into() }
    }

    /// A state that never leaves itself.
    pub fn looping(name: impl Into<StateName>) -> Self {
        let name = name.into();
        Self { next: name.clone(), name }
    }
}

impl<P: ?Sized> State<P> for FixedState {
    fn name(&self) -> &StateName {
        &self.name
    }

    fn transition(&mut self, _payload: &mut P, _ctx: &TickContext<'_>) -> StateResult<StateName> {
        Ok(self.next.clone())
    }
}
