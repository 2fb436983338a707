//! The `State` trait: the main extension point for policy code.

use gb_core::StateName;

use crate::{StateResult, TickContext};

/// One named behavior mode and the rule for what happens next.
///
/// # Contract
///
/// - [`name`][Self::name] is stable for the lifetime of the instance.
/// - [`transition`][Self::transition] first applies this state's effect to
///   the payload and only then decides the next state, which may be its own
///   name.  It is called exactly once per tick in which the state is current.
/// - Any randomness used to pick the next state belongs to the implementation
///   (see [`gb_core::SimRng`]); the machine never reseeds or constrains it.
///
/// # Example
///
/// ```rust,ignore
/// struct Nap { name: StateName }
///
/// impl<P: Pet> State<P> for Nap {
///     fn name(&self) -> &StateName { &self.name }
///
///     fn transition(&mut self, pet: &mut P, ctx: &TickContext<'_>) -> StateResult<StateName> {
///         pet.rest(ctx.interval_minutes)?;
///         Ok(if pet.is_rested() { "AWAKE".into() } else { self.name.clone() })
///     }
/// }
/// ```
pub trait State<P: ?Sized> {
    fn name(&self) -> &StateName;

    /// Mutate the payload for this tick and return the next state's name.
    ///
    /// An `Err` aborts the run; the machine does not retry.
    fn transition(&mut self, payload: &mut P, ctx: &TickContext<'_>) -> StateResult<StateName>;
}

impl<P: ?Sized, S: State<P> + ?Sized> State<P> for Box<S> {
    fn name(&self) -> &StateName {
        (**self).name()
    }

    fn transition(&mut self, payload: &mut P, ctx: &TickContext<'_>) -> StateResult<StateName> {
        (**self).transition(payload, ctx)
    }
}
