//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enum via
//! `#[from]`, so configuration failures surface unchanged through `run`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{days} day(s) at {interval} minute(s) per tick gives zero ticks")]
    ZeroTicks { days: u32, interval: u32 },
}

/// Shorthand result type for `gb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
