//! Guinea pig states and the machine that wires them together.

use gb_core::{MachineConfig, SimRng, StateName};
use gb_machine::{MachineBuilder, MachineResult, StateMachine};
use gb_state::{State, StateResult, TerminalState, TickContext};

use crate::pet::{Changes, Pet};

pub const SLEEPING:  &str = "SLEEPING";
pub const AWAKE:     &str = "AWAKE";
pub const THINKING:  &str = "THINKING";
pub const EATING:    &str = "EATING";
pub const DRINKING:  &str = "DRINKING";
pub const WANDERING: &str = "WANDERING";
pub const END:       &str = "END";

/// `(name, tired, hunger, thirst)` applied on each tick spent in a state.
const STATE_CHANGES: [(&str, Changes); 6] = [
    (SLEEPING,  Changes::new(-20, 3, 1)),
    (AWAKE,     Changes::new(5, 5, 2)),
    (THINKING,  Changes::new(1, 3, 1)),
    (EATING,    Changes::new(5, -10, 4)),
    (DRINKING,  Changes::new(5, 5, -80)),
    (WANDERING, Changes::new(10, 10, 5)),
];

/// One activity of the guinea pig.
///
/// Applies its attribute changes, then picks the next activity: `END` once
/// the pet has died, a pressing need if there is one, otherwise a random
/// pastime drawn from the state's own seeded stream.
pub struct GuineaPigState {
    name:    StateName,
    changes: Changes,
    rng:     SimRng,
}

impl GuineaPigState {
    pub fn new(name: impl Into<StateName>, changes: Changes, rng: SimRng) -> Self {
        Self { name: name.into(), changes, rng }
    }

    fn next_state<P: Pet + ?Sized>(&mut self, pet: &P) -> StateName {
        let next = if pet.has_died() {
            END
        } else if pet.is_tired() {
            SLEEPING
        } else if pet.is_hungry() {
            EATING
        } else if pet.is_thirsty() {
            DRINKING
        } else if self.rng.roll(10) > 5 {
            WANDERING
        } else if self.rng.roll(10) > 8 {
            THINKING
        } else {
            AWAKE
        };
        StateName::new(next)
    }
}

impl<P: Pet + ?Sized> State<P> for GuineaPigState {
    fn name(&self) -> &StateName {
        &self.name
    }

    fn transition(&mut self, pet: &mut P, ctx: &TickContext<'_>) -> StateResult<StateName> {
        pet.apply(&self.name, self.changes, ctx)?;
        Ok(self.next_state(pet))
    }
}

/// Register every activity plus the `END` sentinel.
///
/// Each state gets its own stream split from `seed`, so a given seed always yields
/// the same life story.
pub fn build_machine<P: Pet + ?Sized>(config: MachineConfig, seed: u64) -> MachineResult<StateMachine<P>> {
    let mut root = SimRng::new(seed);
    let mut builder = MachineBuilder::new(config);
    for (i, (name, changes)) in STATE_CHANGES.into_iter().enumerate() {
        builder = builder.state(GuineaPigState::new(name, changes, root.split(i as u64)));
    }
    builder.state(TerminalState::new(END)).build()
}
