//! Fluent builder for constructing a [`StateMachine`].

use gb_core::MachineConfig;
use gb_state::State;

use crate::pacer::Pacer;
use crate::{MachineResult, StateMachine};

/// Fluent builder for [`StateMachine<P>`].
///
/// | Method          | Default                                            |
/// |-----------------|----------------------------------------------------|
/// | `.state(s)`     | No states                                          |
/// | `.pacer(p)`     | `NoPause` if `config.accelerated`, else real sleep |
///
/// # Example
///
/// ```rust,ignore
/// let mut machine = MachineBuilder::new(MachineConfig::fixed_ticks(1, 15).accelerated(true))
///     .state(FixedState::new("AWAKE", "SLEEPING"))
///     .state(FixedState::new("SLEEPING", "AWAKE"))
///     .build()?;
/// machine.run("awake", &mut pet)?;
/// println!("{}", machine.stats()?);
/// ```
pub struct MachineBuilder<P: ?Sized> {
    config: MachineConfig,
    states: Vec<Box<dyn State<P>>>,
    pacer:  Option<Box<dyn Pacer>>,
}

impl<P: ?Sized> MachineBuilder<P> {
    pub fn new(config: MachineConfig) -> Self {
        Self { config, states: Vec::new(), pacer: None }
    }

    pub fn state<S>(mut self, state: S) -> Self
    where
        S: State<P> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Override the pacer chosen from `config.accelerated`.
    pub fn pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Some(Box::new(pacer));
        self
    }

    /// Validate the config, register every state (rejecting duplicates) and
    /// return a ready-to-run machine.
    pub fn build(self) -> MachineResult<StateMachine<P>> {
        let mut machine = match self.pacer {
            Some(pacer) => StateMachine::with_pacer(self.config, pacer)?,
            None => StateMachine::new(self.config)?,
        };
        for state in self.states {
            machine.add_boxed(state)?;
        }
        Ok(machine)
    }
}
