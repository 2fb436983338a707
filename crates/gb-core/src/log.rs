//! Tick-labelled logging.
//!
//! A `LogContext` is owned by the state machine and carries the label of the
//! current simulated time.  The machine calls [`LogContext::set_context`] once
//! per tick before logging anything, and hands `&LogContext` to each state so
//! domain log lines carry the same label.  Events go through `tracing` with
//! the label in the `smt` field.

use std::fmt;
use std::str::FromStr;

use tracing::Level;

use crate::{CoreError, CoreResult};

/// Label used before the first tick.
pub const INITIALISE: &str = "INITIALISE";
/// Label used once the run has finished.
pub const COMPLETE: &str = "COMPLETE";

#[derive(Clone, Debug)]
pub struct LogContext {
    label: String,
}

impl Default for LogContext {
    fn default() -> Self {
        Self { label: INITIALISE.to_owned() }
    }
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_context(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn debug(&self, message: impl fmt::Display) {
        tracing::debug!(smt = %self.label, "{message}");
    }

    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!(smt = %self.label, "{message}");
    }

    pub fn warn(&self, message: impl fmt::Display) {
        tracing::warn!(smt = %self.label, "{message}");
    }

    pub fn error(&self, message: impl fmt::Display) {
        tracing::error!(smt = %self.label, "{message}");
    }
}

/// Install a console subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise `level` (e.g. `"info"`) is
/// used.  An unknown level name is rejected rather than silently ignored.
pub fn init_logging(level: &str) -> CoreResult<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    Level::from_str(level)
        .map_err(|_| CoreError::Config(format!("invalid log level: {level}")))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| CoreError::Config(format!("logging already initialised: {e}")))
}
