use gb_core::{CoreError, StateName, Tick};
use gb_state::StateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("state {0} is already registered")]
    DuplicateState(StateName),

    #[error("state {name} is not registered (looked up at {tick})")]
    UnknownState { name: StateName, tick: Tick },

    #[error("terminal state {0} is not registered")]
    TerminalNotRegistered(StateName),

    #[error("machine has already run; build a new one for another lifetime")]
    AlreadyRun,

    #[error("states can only be added before the machine runs")]
    SetupClosed,

    #[error("no ticks were executed; statistics are undefined")]
    NoTicks,

    #[error("state {state} failed at {tick}: {source}")]
    Transition {
        state:  StateName,
        tick:   Tick,
        #[source]
        source: StateError,
    },
}

pub type MachineResult<T> = Result<T, MachineError>;
