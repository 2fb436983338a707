//! Name → state and name → visit-count bookkeeping.

use std::collections::{BTreeMap, HashMap};

use gb_core::{StateName, Tick};
use gb_state::State;

use crate::{MachineError, MachineResult};

/// Registered states and their visit counts.
///
/// Counts live in a `BTreeMap` so reports list states in name order.  Every
/// registered state has a count entry, starting at zero.
pub struct StateRegistry<P: ?Sized> {
    states: HashMap<StateName, Box<dyn State<P>>>,
    counts: BTreeMap<StateName, u64>,
}

impl<P: ?Sized> Default for StateRegistry<P> {
    fn default() -> Self {
        Self { states: HashMap::new(), counts: BTreeMap::new() }
    }
}

impl<P: ?Sized> StateRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `state` under its (normalized) name.
    ///
    /// A second state with the same name is rejected; overwriting would
    /// silently reset that state's count.
    pub fn insert(&mut self, state: Box<dyn State<P>>) -> MachineResult<()> {
        let name = state.name().clone();
        if self.states.contains_key(&name) {
            return Err(MachineError::DuplicateState(name));
        }
        self.counts.insert(name.clone(), 0);
        self.states.insert(name, state);
        Ok(())
    }

    #[inline]
    pub fn contains(&self, name: &StateName) -> bool {
        self.states.contains_key(name)
    }

    /// Look up a state for execution at `tick`.
    pub fn get_mut(&mut self, name: &StateName, tick: Tick) -> MachineResult<&mut (dyn State<P> + 'static)> {
        match self.states.get_mut(name) {
            Some(state) => Ok(&mut **state),
            None => Err(MachineError::UnknownState { name: name.clone(), tick }),
        }
    }

    /// Record one visit.  Only called for registered names.
    #[inline]
    pub(crate) fn record_visit(&mut self, name: &StateName) {
        if let Some(count) = self.counts.get_mut(name) {
            *count += 1;
        }
    }

    pub fn count(&self, name: &StateName) -> Option<u64> {
        self.counts.get(name).copied()
    }

    pub fn counts(&self) -> &BTreeMap<StateName, u64> {
        &self.counts
    }

    /// Sum of all visit counts; equals the ticks completed by the machine.
    pub fn total_visits(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn names(&self) -> impl Iterator<Item = &StateName> {
        self.counts.keys()
    }
}
