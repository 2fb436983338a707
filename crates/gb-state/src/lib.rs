//! `gb-state`: the pluggable state contract.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`model`]    | `State<P>` trait                                              |
//! | [`context`]  | `TickContext<'a>`: tick, interval and log context per call   |
//! | [`builtin`]  | `TerminalState`, `FixedState`                                 |
//! | [`error`]    | `StateError`, `StateResult<T>`                                |
//!
//! # Design notes
//!
//! A state's `transition` is the only code allowed to mutate the payload.
//! The payload type `P` is chosen by the application; policy crates usually
//! describe what their states may do with it as a capability trait and
//! implement `State<P>` for every `P` satisfying that trait, so tests can
//! substitute a fake payload.

pub mod builtin;
pub mod context;
pub mod error;
pub mod model;


pub use builtin::{FixedState, TerminalState};
pub use context::TickContext;
pub use error::{StateError, StateResult};
pub use model::State;
