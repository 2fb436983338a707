//! Seeded dice for policy plug-ins.
//!
//! The machine itself never draws random numbers.  States that pick their
//! next activity at random own a `SimRng`, so two runs built from the same
//! seed visit the same sequence of states regardless of pacing.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off stream `stream` (e.g. a state's registration index).
    ///
    /// Splitting advances `self`, so the same seed split in the same order
    /// always yields the same streams.
    pub fn split(&mut self, stream: u64) -> SimRng {
        let base: u64 = self.0.r#gen();
        SimRng::new(splitmix64(base.wrapping_add(stream)))
    }

    /// Roll a die with `sides` faces: a value in `1..=sides`.
    ///
    /// A zero-sided die always rolls 1.
    #[inline]
    pub fn roll(&mut self, sides: u32) -> u32 {
        self.0.gen_range(1..=sides.max(1))
    }
}

/// SplitMix64 finalizer: spreads nearby inputs over the whole seed space.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
