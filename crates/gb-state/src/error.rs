use thiserror::Error;

/// Failure raised from inside a state's `transition`.
///
/// The machine never recovers from these; they abort the run.
#[derive(Debug, Error)]
pub enum StateError {
    /// The payload was driven outside its valid range.
    #[error("payload invariant violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type StateResult<T> = Result<T, StateError>;
