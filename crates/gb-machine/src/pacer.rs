//! Real-time pacing between ticks.

use std::time::Duration;

/// Blocks between ticks.
///
/// Pacing never affects which states are visited; it only spaces ticks out
/// in wall-clock time.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the calling thread for the full tick interval.
pub struct RealTimePacer;

impl Pacer for RealTimePacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Accelerated mode: returns immediately.
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _duration: Duration) {}
}
